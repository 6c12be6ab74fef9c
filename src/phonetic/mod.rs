//! Grapheme-to-phoneme normalization for Spanish.
//!
//! Orthographic words are rewritten into a closed 24-symbol phonemic
//! alphabet by an ordered list of context-sensitive rewrite rules. Each
//! phoneme is one `char` and carries place, manner and voicing features
//! used by the process classifier.
//!
//! # Usage
//!
//! ```
//! use teprosif::phonetic::{features, normalize, Manner};
//!
//! let phonemic = normalize("enchufe");
//! assert_eq!(phonemic, "enĉufe");
//! assert_eq!(features('ĉ').unwrap().manner, Manner::Affricate);
//! ```
//!
//! # Rule Set
//!
//! See [`NORMALIZATION_RULES`] for the ordered rules. Order matters: the
//! rules are not confluent, and running `c → k` before `ch → ĉ` would
//! collapse the digraph.

pub mod application;
pub mod matching;
pub mod rules;
pub mod types;

pub use application::{apply_rule_pass, apply_rules_ordered, is_phonemic, normalize, to_phonemic};
pub use matching::{contains_run, context_matches, count_occurrences, pattern_matches_at};
pub use rules::NORMALIZATION_RULES;
pub use types::{
    features, is_phoneme, is_strong_vowel, is_vowel, is_weak_vowel, Context, Features, Manner,
    Phoneme, RewriteRule, Zone, AFFRICATE_CH, ASPIRATE, PALATAL_NASAL, PHONEMES, TRILL,
};
