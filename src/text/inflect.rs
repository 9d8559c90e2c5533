// Rule-based English singularization.
//
// Recognizes regular plurals (-s, -es, -ies), a table of irregular plurals
// (children, mice, wolves, ...), and a set of words that end in "s" without
// being plural (function words, uninflected nouns, -ics fields of study).
// Anything it does not recognize as a plural is reported as `None` so the
// normalizer keeps the word unchanged.
//
// The output of `singularize` is never itself recognized as a plural, which
// keeps normalization idempotent on its own output.

use std::collections::{HashMap, HashSet};

use super::traits::Singularizer;

/// Irregular plural → singular pairs that the suffix rules would get wrong.
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("dice", "die"),
    ("axes", "axe"),
    ("quizzes", "quiz"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("appendices", "appendix"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("bases", "base"),
    ("alumni", "alumnus"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("radii", "radius"),
    ("nuclei", "nucleus"),
    ("stimuli", "stimulus"),
    ("wolves", "wolf"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("wives", "wife"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("selves", "self"),
    ("calves", "calf"),
    ("loaves", "loaf"),
    ("elves", "elf"),
    ("scarves", "scarf"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("echoes", "echo"),
    ("vetoes", "veto"),
    ("torpedoes", "torpedo"),
    ("volcanoes", "volcano"),
    ("mosquitoes", "mosquito"),
    ("embargoes", "embargo"),
    ("dominoes", "domino"),
    ("buffaloes", "buffalo"),
    ("buses", "bus"),
    ("viruses", "virus"),
    ("bonuses", "bonus"),
    ("campuses", "campus"),
    ("statuses", "status"),
    ("focuses", "focus"),
    ("censuses", "census"),
    ("circuses", "circus"),
    ("choruses", "chorus"),
    ("geniuses", "genius"),
    ("surpluses", "surplus"),
    ("gases", "gas"),
    ("biases", "bias"),
    ("atlases", "atlas"),
    ("aliases", "alias"),
    ("canvases", "canvas"),
    ("lenses", "lens"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("zombies", "zombie"),
    ("calories", "calorie"),
    ("brownies", "brownie"),
    ("rookies", "rookie"),
    ("prairies", "prairie"),
    ("sorties", "sortie"),
    ("goalies", "goalie"),
    ("selfies", "selfie"),
    ("smoothies", "smoothie"),
    ("aches", "ache"),
    ("headaches", "headache"),
    ("niches", "niche"),
    ("caches", "cache"),
    ("avalanches", "avalanche"),
    ("moustaches", "moustache"),
];

/// Words ending in "s" that are not plurals, or whose plural is identical.
const NOT_PLURAL: &[&str] = &[
    "is", "was", "has", "his", "its", "this", "thus", "us", "as", "yes", "does", "goes", "always",
    "perhaps", "whereas", "besides", "sometimes", "unless", "towards", "afterwards",
    "upwards", "downwards", "backwards", "forwards", "nevertheless", "across", "ours",
    "yours", "hers", "theirs", "whose", "lens", "gas", "bias", "atlas", "alias", "canvas",
    "chaos", "kudos", "ethos", "pathos", "cosmos", "news", "series", "species", "means",
    "headquarters", "scissors", "trousers", "pants", "clothes", "thanks", "whereabouts",
    "sheep", "fish", "deer", "moose", "aircraft", "offspring", "swine", "bison", "salmon",
    "trout",
];

/// English singularizer backed by suffix rules and lookup tables.
pub struct EnglishSingularizer {
    irregular: HashMap<&'static str, &'static str>,
    not_plural: HashSet<&'static str>,
}

impl Default for EnglishSingularizer {
    fn default() -> Self {
        Self {
            irregular: IRREGULAR.iter().copied().collect(),
            not_plural: NOT_PLURAL.iter().copied().collect(),
        }
    }
}

impl EnglishSingularizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply_suffix_rules(word: &str) -> Option<String> {
        if word.len() < 3 || !word.ends_with('s') {
            return None;
        }

        // Singular nouns and adjectives that merely end in s
        if ["ss", "us", "is", "ics"].iter().any(|s| word.ends_with(s)) {
            return None;
        }

        if let Some(stem) = word.strip_suffix("ies") {
            // Short forms (ties, lies, pies) only lose the trailing s
            return if stem.len() <= 1 {
                Some(format!("{stem}ie"))
            } else {
                Some(format!("{stem}y"))
            };
        }

        for sibilant in ["sses", "shes", "ches", "xes", "zzes"] {
            if word.ends_with(sibilant) {
                return Some(word[..word.len() - 2].to_string());
            }
        }

        Some(word[..word.len() - 1].to_string())
    }

    /// One lookup-or-suffix step.
    fn step(&self, word: &str) -> Option<String> {
        if let Some(singular) = self.irregular.get(word) {
            return Some((*singular).to_string());
        }
        if self.not_plural.contains(word) {
            return None;
        }

        Self::apply_suffix_rules(word).filter(|singular| singular != word && !singular.is_empty())
    }
}

/// Upper bound on chained steps ("childrens" → "children" → "child").
const MAX_STEPS: usize = 4;

impl Singularizer for EnglishSingularizer {
    fn singularize(&self, word: &str) -> Option<String> {
        let mut current = self.step(word)?;
        for _ in 1..MAX_STEPS {
            match self.step(&current) {
                Some(next) => current = next,
                None => break,
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn singular(word: &str) -> Option<String> {
        EnglishSingularizer::default().singularize(word)
    }

    #[test]
    fn regular_plurals() {
        assert_eq!(singular("cats").as_deref(), Some("cat"));
        assert_eq!(singular("cities").as_deref(), Some("city"));
        assert_eq!(singular("boxes").as_deref(), Some("box"));
        assert_eq!(singular("churches").as_deref(), Some("church"));
        assert_eq!(singular("classes").as_deref(), Some("class"));
        assert_eq!(singular("houses").as_deref(), Some("house"));
        assert_eq!(singular("ties").as_deref(), Some("tie"));
        assert_eq!(singular("gloves").as_deref(), Some("glove"));
    }

    #[test]
    fn irregular_plurals() {
        assert_eq!(singular("children").as_deref(), Some("child"));
        assert_eq!(singular("mice").as_deref(), Some("mouse"));
        assert_eq!(singular("wolves").as_deref(), Some("wolf"));
        assert_eq!(singular("heroes").as_deref(), Some("hero"));
        assert_eq!(singular("viruses").as_deref(), Some("virus"));
    }

    #[test]
    fn possessive_irregular_plurals_reach_the_singular() {
        // "children's" loses its apostrophe before singularization
        assert_eq!(singular("childrens").as_deref(), Some("child"));
        assert_eq!(singular("womens").as_deref(), Some("woman"));
        assert_eq!(singular("peoples").as_deref(), Some("person"));
    }

    #[test]
    fn non_plurals_pass_through() {
        for word in ["cat", "run", "is", "was", "this", "glass", "bus", "famous", "physics", "news", "a", ""] {
            assert_eq!(singular(word), None, "{word} should not be singularized");
        }
    }

    #[test]
    fn output_is_never_singularized_again() {
        let engine = EnglishSingularizer::default();
        for word in ["cats", "cities", "boxes", "classes", "lenses", "buses", "analyses", "ties", "heroes", "quizzes",
            "childrens", "womens", "peoples", "mens"] {
            let once = engine.singularize(word).unwrap_or_else(|| word.to_string());
            assert_eq!(engine.singularize(&once), None, "{word} -> {once} was singularized twice");
        }
    }
}
