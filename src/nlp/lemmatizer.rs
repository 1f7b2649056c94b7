//! Rule-based noun lemmatization
//!
//! Every word is treated as a noun and reduced to its singular form. An
//! irregular-form table is consulted first, then an ordered list of suffix
//! rules where the first matching rule wins.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::types::Token;

/// Irregular plural -> singular forms
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("lice", "louse"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("echoes", "echo"),
    ("torpedoes", "torpedo"),
    ("volcanoes", "volcano"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("wolves", "wolf"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("thieves", "thief"),
    ("leaves", "leaf"),
    ("elves", "elf"),
    ("selves", "self"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("loaves", "loaf"),
    ("calves", "calf"),
    ("dwarves", "dwarf"),
];

/// Words that look plural but are not inflected
const UNINFLECTED: &[&str] = &[
    "news",
    "series",
    "species",
    "physics",
    "mathematics",
    "politics",
    "economics",
    "ethics",
    "athletics",
    "gymnastics",
    "means",
    "headquarters",
    "chaos",
    "pathos",
    "cosmos",
    "atlas",
    "canvas",
    "christmas",
    "aircraft",
    "sheep",
    "deer",
    "fish",
    "moose",
];

/// Singular nouns ending in "ie" whose plurals must not go through `ies -> y`
const IE_NOUNS: &[&str] = &[
    "movie", "zombie", "cookie", "rookie", "hippie", "brownie", "calorie", "genie", "goalie",
    "pixie", "selfie", "prairie", "auntie", "birdie", "bookie", "hottie", "newbie", "sweetie",
    "yuppie", "groupie", "roadie", "indie", "boogie", "collie", "magpie", "necktie", "lie", "tie", "pie", "die",
];

/// Singular nouns ending in "che" whose plurals must not go through `ches -> ch`
const CHE_NOUNS: &[&str] = &[
    "cache", "niche", "ache", "headache", "toothache", "heartache", "stomachache", "backache",
    "earache", "bellyache", "cliche", "creche", "avalanche", "quiche", "psyche", "moustache",
    "mustache", "attache", "microfiche", "tranche", "douche", "gouache",
];

/// Singular words ending in "men" that are not compounds of "man".
///
/// Matched as whole words: "semen" must not block "horsemen".
const MEN_KEEP: &[&str] = &[
    "omen", "amen", "specimen", "abdomen", "stamen", "regimen", "hymen", "yemen", "lumen",
    "semen", "gravamen", "acumen", "albumen", "bitumen", "cerumen", "rumen", "foramen",
    "dolmen", "tegmen", "putamen",
];

/// Ordered suffix rules: (suffix, replacement)
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zzes", "zz"),
    ("ies", "y"),
    ("men", "man"),
    ("s", ""),
];

/// Endings that keep their final "s"
const KEEP_S_ENDINGS: &[&str] = &["ss", "us", "is"];

/// A noun lemmatizer backed by suffix rules and an exception table
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: FxHashMap<String, String>,
    uninflected: FxHashSet<String>,
    ie_nouns: FxHashSet<String>,
    che_nouns: FxHashSet<String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    /// Create a lemmatizer with the built-in English tables
    pub fn new() -> Self {
        Self {
            exceptions: IRREGULAR
                .iter()
                .map(|(plural, singular)| (plural.to_string(), singular.to_string()))
                .collect(),
            uninflected: UNINFLECTED.iter().map(|w| w.to_string()).collect(),
            ie_nouns: IE_NOUNS.iter().map(|w| w.to_string()).collect(),
            che_nouns: CHE_NOUNS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Add custom `(form, lemma)` exceptions, overriding built-in ones
    pub fn with_exceptions(mut self, pairs: &[(&str, &str)]) -> Self {
        for (form, lemma) in pairs {
            self.exceptions
                .insert(form.to_lowercase(), lemma.to_lowercase());
        }
        self
    }

    /// Reduce a lowercase word to its lemma
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            return lemma.clone();
        }
        if word.len() <= 3 || self.uninflected.contains(word) {
            return word.to_string();
        }

        for &(suffix, replacement) in SUFFIX_RULES {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            match suffix {
                "s" if KEEP_S_ENDINGS.iter().any(|e| word.ends_with(e)) => {
                    return word.to_string();
                }
                "ches" => {
                    let che_form = format!("{stem}che");
                    if self.che_nouns.contains(&che_form) {
                        return che_form;
                    }
                }
                "ies" => {
                    let ie_form = format!("{stem}ie");
                    if self.ie_nouns.contains(&ie_form) {
                        return ie_form;
                    }
                }
                "men" if MEN_KEEP.contains(&word) => {
                    return word.to_string();
                }
                _ => {}
            }
            return format!("{stem}{replacement}");
        }

        word.to_string()
    }

    /// Replace each token's lemma in place
    pub fn lemmatize_tokens(&self, tokens: &mut [Token]) {
        for token in tokens {
            token.lemma = self.lemmatize(&token.lemma);
        }
    }
}

/// Convert a list of words to their lemmas
pub fn lemmatise_text<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let lemmatizer = Lemmatizer::new();
    words
        .iter()
        .map(|w| lemmatizer.lemmatize(w.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize("earths"), "earth");
        assert_eq!(l.lemmatize("aliens"), "alien");
        assert_eq!(l.lemmatize("churches"), "church");
        assert_eq!(l.lemmatize("wishes"), "wish");
        assert_eq!(l.lemmatize("boxes"), "box");
        assert_eq!(l.lemmatize("classes"), "class");
        assert_eq!(l.lemmatize("cities"), "city");
        assert_eq!(l.lemmatize("policemen"), "policeman");
    }

    #[test]
    fn test_irregular_forms() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize("heroes"), "hero");
        assert_eq!(l.lemmatize("children"), "child");
        assert_eq!(l.lemmatize("wolves"), "wolf");
        assert_eq!(l.lemmatize("women"), "woman");
    }

    #[test]
    fn test_ie_nouns_keep_their_ending() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize("movies"), "movie");
        assert_eq!(l.lemmatize("zombies"), "zombie");
    }

    #[test]
    fn test_words_that_keep_final_s() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize("mischievous"), "mischievous");
        assert_eq!(l.lemmatize("boss"), "boss");
        assert_eq!(l.lemmatize("analysis"), "analysis");
        assert_eq!(l.lemmatize("virus"), "virus");
        assert_eq!(l.lemmatize("news"), "news");
        assert_eq!(l.lemmatize("specimen"), "specimen");
    }

    #[test]
    fn test_men_singulars_are_not_compounds() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize("lumens"), "lumen");
        assert_eq!(l.lemmatize("lumen"), "lumen");
        assert_eq!(l.lemmatize("semen"), "semen");
        assert_eq!(l.lemmatize("gravamen"), "gravamen");
        assert_eq!(l.lemmatize("horsemen"), "horseman");
        assert_eq!(l.lemmatize("spacemen"), "spaceman");
    }

    #[test]
    fn test_che_nouns_keep_their_ending() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize("caches"), "cache");
        assert_eq!(l.lemmatize("niches"), "niche");
        assert_eq!(l.lemmatize("headaches"), "headache");
        assert_eq!(l.lemmatize("avalanches"), "avalanche");
        assert_eq!(l.lemmatize("beaches"), "beach");
        assert_eq!(l.lemmatize("coaches"), "coach");
    }

    #[test]
    fn test_short_words_unchanged() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize("us"), "us");
        assert_eq!(l.lemmatize("was"), "was");
        assert_eq!(l.lemmatize("his"), "his");
    }

    #[test]
    fn test_lemmas_are_stable() {
        let l = Lemmatizer::new();
        for word in [
            "earths", "churches", "cities", "movies", "heroes", "classes", "lumens", "omens",
            "specimens", "abdomens", "gravamens", "horsemen", "caches", "niches", "headaches",
            "beaches", "boxes", "wishes",
        ] {
            let once = l.lemmatize(word);
            assert_eq!(l.lemmatize(&once), once, "{word}");
        }
    }

    #[test]
    fn test_custom_exceptions_override() {
        let l = Lemmatizer::new().with_exceptions(&[("avengers", "avengers")]);
        assert_eq!(l.lemmatize("avengers"), "avengers");
        assert_eq!(Lemmatizer::new().lemmatize("avengers"), "avenger");
    }

    #[test]
    fn test_lemmatise_text_maps_each_word() {
        assert_eq!(
            lemmatise_text(&["heroes", "must", "fight"]),
            vec!["hero", "must", "fight"]
        );
    }

    #[test]
    fn test_lemmatize_tokens_keeps_surface_text() {
        let mut tokens = vec![Token::new("armies", 0)];
        Lemmatizer::new().lemmatize_tokens(&mut tokens);
        assert_eq!(tokens[0].text, "armies");
        assert_eq!(tokens[0].lemma, "army");
    }
}
