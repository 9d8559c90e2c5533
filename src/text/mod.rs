// Text normalization — lowercase, strip punctuation and digits, split, singularize.

pub mod inflect;
pub mod normalize;
pub mod traits;
