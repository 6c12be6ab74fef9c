//! The Spanish orthography-to-phoneme rule set.
//!
//! Rules are applied as ordered global passes (see
//! [`super::application::apply_rules_ordered`]). Order matters: digraphs are
//! rewritten before the single letters they contain, and the soft readings of
//! `c`/`g` before front vowels are taken before the residual hard readings.
//!
//! | Step | Rewrites |
//! |------|----------|
//! | accents | á é í ó ú ü → a e i o u |
//! | digraphs | ch → ĉ, ll → y, rr → R, qu → k |
//! | c | c → s / _[ei], c → k |
//! | g, j | g → x / _[ei], j → x |
//! | merges | v → b (betacism), z → s (seseo), ñ → ɲ |
//! | silent h | h → ∅ / #_ (unless the word is just "h") |

use super::types::{Context, RewriteRule, AFFRICATE_CH, PALATAL_NASAL, TRILL};

/// Front vowels for c/g softening.
const FRONT_VOWELS: &[char] = &['e', 'i'];

const fn rule(
    id: usize,
    name: &'static str,
    pattern: &'static [char],
    replacement: &'static [char],
    context: Context,
) -> RewriteRule {
    RewriteRule {
        id,
        name,
        pattern,
        replacement,
        context,
    }
}

/// The complete ordered normalization rule set.
pub static NORMALIZATION_RULES: &[RewriteRule] = &[
    // Accents
    rule(0, "á → a", &['á'], &['a'], Context::Anywhere),
    rule(1, "é → e", &['é'], &['e'], Context::Anywhere),
    rule(2, "í → i", &['í'], &['i'], Context::Anywhere),
    rule(3, "ó → o", &['ó'], &['o'], Context::Anywhere),
    rule(4, "ú → u", &['ú'], &['u'], Context::Anywhere),
    rule(5, "ü → u", &['ü'], &['u'], Context::Anywhere),
    // Digraphs
    rule(6, "ch → ĉ", &['c', 'h'], &[AFFRICATE_CH], Context::Anywhere),
    rule(7, "ll → y", &['l', 'l'], &['y'], Context::Anywhere),
    rule(8, "rr → R", &['r', 'r'], &[TRILL], Context::Anywhere),
    rule(9, "qu → k", &['q', 'u'], &['k'], Context::Anywhere),
    // c
    rule(10, "c → s / _[ei]", &['c'], &['s'], Context::BeforeAny(FRONT_VOWELS)),
    rule(11, "c → k", &['c'], &['k'], Context::Anywhere),
    // g, j
    rule(12, "g → x / _[ei]", &['g'], &['x'], Context::BeforeAny(FRONT_VOWELS)),
    rule(13, "j → x", &['j'], &['x'], Context::Anywhere),
    // Merges
    rule(14, "v → b", &['v'], &['b'], Context::Anywhere),
    rule(15, "z → s", &['z'], &['s'], Context::Anywhere),
    rule(16, "ñ → ɲ", &['ñ'], &[PALATAL_NASAL], Context::Anywhere),
    // Silent h
    rule(17, "h → ∅ / #_", &['h'], &[], Context::WordInitial),
];
