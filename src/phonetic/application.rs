//! Rule application and the public normalizer.
//!
//! # Functions
//!
//! - [`apply_rule_pass`] - Rewrite every non-overlapping match of one rule
//! - [`apply_rules_ordered`] - Run each rule of a set once, in order
//! - [`normalize`] - Orthographic word → phonemic string
//! - [`to_phonemic`] - Normalize only if the input is not already phonemic
//!
//! Each rule makes exactly one left-to-right pass over the output of the
//! previous rule. The passes are not repeated until a fixed point: a rule
//! never sees characters produced by a later rule, and the word-initial `h`
//! rule drops at most one `h`.

use super::matching::{context_matches, pattern_matches_at};
use super::rules::NORMALIZATION_RULES;
use super::types::{is_phoneme, RewriteRule};

// ============================================================================
// Rule passes
// ============================================================================

/// Apply one rule at every non-overlapping position where it matches,
/// scanning left to right.
///
/// Contexts are evaluated against the input of the pass, so a replacement
/// never enables or blocks a later match of the same rule.
pub fn apply_rule_pass(rule: &RewriteRule, s: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(s.len());
    let mut pos = 0;
    while pos < s.len() {
        if pattern_matches_at(rule.pattern, s, pos)
            && context_matches(&rule.context, s, pos, rule.pattern.len())
        {
            out.extend_from_slice(rule.replacement);
            pos += rule.pattern.len();
        } else {
            out.push(s[pos]);
            pos += 1;
        }
    }
    out
}

/// Apply every rule of `rules` once, in order.
pub fn apply_rules_ordered(rules: &[RewriteRule], s: &[char]) -> Vec<char> {
    rules
        .iter()
        .fold(s.to_vec(), |current, rule| apply_rule_pass(rule, &current))
}

// ============================================================================
// Normalizer
// ============================================================================

/// Convert an orthographic Spanish word to its phonemic string.
///
/// The input is trimmed and lowercased before the rule set runs. Empty input
/// gives empty output; characters no rule touches pass through unchanged.
///
/// ```
/// use teprosif::phonetic::normalize;
///
/// assert_eq!(normalize("Jugo"), "xugo");
/// assert_eq!(normalize("guitarra"), "guitaRa");
/// assert_eq!(normalize("helicóptero"), "elikoptero");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered: Vec<char> = text.trim().chars().flat_map(char::to_lowercase).collect();
    if lowered.is_empty() {
        return String::new();
    }
    apply_rules_ordered(NORMALIZATION_RULES, &lowered)
        .into_iter()
        .collect()
}

/// Returns true if `s` is already a phonemic string: every character is a
/// symbol of the alphabet and no rule would rewrite it.
///
/// `"goRo"` is phonemic; `"gorro"` is not, because `rr` is still a digraph.
pub fn is_phonemic(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars.iter().all(|&c| is_phoneme(c))
        && apply_rules_ordered(NORMALIZATION_RULES, &chars) == chars
}

/// Return `s` unchanged if it is already phonemic, otherwise normalize it.
pub fn to_phonemic(s: &str) -> String {
    if is_phonemic(s) {
        s.to_string()
    } else {
        normalize(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetic::types::Context;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_apply_rule_pass_replaces_all() {
        let rule = RewriteRule {
            id: 0,
            name: "rr → R",
            pattern: &['r', 'r'],
            replacement: &['R'],
            context: Context::Anywhere,
        };
        assert_eq!(apply_rule_pass(&rule, &chars("rrarr")), chars("RaR"));
        assert_eq!(apply_rule_pass(&rule, &chars("rrr")), chars("Rr"));
    }

    #[test]
    fn test_apply_rule_pass_with_deletion() {
        let rule = RewriteRule {
            id: 0,
            name: "h → ∅ / #_",
            pattern: &['h'],
            replacement: &[],
            context: Context::WordInitial,
        };
        assert_eq!(apply_rule_pass(&rule, &chars("hola")), chars("ola"));
        assert_eq!(apply_rule_pass(&rule, &chars("ahora")), chars("ahora"));
        assert_eq!(apply_rule_pass(&rule, &chars("h")), chars("h"));
    }

    #[test]
    fn test_normalize_plain_words() {
        assert_eq!(normalize("mariposa"), "mariposa");
        assert_eq!(normalize("tren"), "tren");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_digraphs() {
        assert_eq!(normalize("plancha"), "planĉa");
        assert_eq!(normalize("gorro"), "goRo");
        assert_eq!(normalize("llave"), "yabe");
        assert_eq!(normalize("queso"), "keso");
    }

    #[test]
    fn test_normalize_soft_c_and_g() {
        assert_eq!(normalize("bicicleta"), "bisikleta");
        assert_eq!(normalize("calcetín"), "kalsetin");
        assert_eq!(normalize("refrigerador"), "refrixerador");
        assert_eq!(normalize("jirafa"), "xirafa");
        assert_eq!(normalize("gato"), "gato");
    }

    #[test]
    fn test_normalize_merges_and_accents() {
        assert_eq!(normalize("volantín"), "bolantin");
        assert_eq!(normalize("zapato"), "sapato");
        assert_eq!(normalize("niño"), "niɲo");
        assert_eq!(normalize("ÁRBOL"), "arbol");
    }

    #[test]
    fn test_normalize_silent_h() {
        assert_eq!(normalize("helicóptero"), "elikoptero");
        assert_eq!(normalize("h"), "h");
        assert_eq!(normalize("búho"), "buho");
    }

    #[test]
    fn test_to_phonemic() {
        assert!(is_phonemic("goRo"));
        assert!(is_phonemic("mariposa"));
        assert!(!is_phonemic("gorro"));
        assert!(!is_phonemic("gitano"));
        assert!(!is_phonemic("hola"));
        assert!(!is_phonemic("Mariposa"));
        assert_eq!(to_phonemic("goRo"), "goRo");
        assert_eq!(to_phonemic("jugo"), "xugo");
        assert_eq!(to_phonemic("gorro"), "goRo");
        assert_eq!(to_phonemic(""), "");
    }
}
