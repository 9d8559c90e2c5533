// Curve fitting for the count-of-counts distribution.

pub mod powerlaw;
