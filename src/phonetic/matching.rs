//! Context and pattern matching for rewrite rules.
//!
//! All matching works on `char` slices, so the dedicated multi-byte symbols
//! (`ĉ`, `ɲ`) and accented input letters are single units.

use super::types::Context;

// ============================================================================
// Context matching
// ============================================================================

/// Check if a context is satisfied for a match of `pattern_len` characters
/// starting at `pos`.
pub fn context_matches(ctx: &Context, s: &[char], pos: usize, pattern_len: usize) -> bool {
    match ctx {
        Context::Anywhere => true,
        Context::BeforeAny(following) => s
            .get(pos + pattern_len)
            .is_some_and(|c| following.contains(c)),
        Context::WordInitial => pos == 0 && s.len() > pattern_len,
    }
}

// ============================================================================
// Pattern matching
// ============================================================================

/// Check if a pattern matches at a specific position.
///
/// An empty pattern never matches; rules must consume at least one character.
pub fn pattern_matches_at(pattern: &[char], s: &[char], pos: usize) -> bool {
    if pattern.is_empty() {
        return false;
    }
    s.get(pos..pos + pattern.len())
        .is_some_and(|window| window == pattern)
}

/// Count non-overlapping occurrences of `needle` in `haystack`, scanning left
/// to right.
pub fn count_occurrences<T: PartialEq>(haystack: &[T], needle: &[T]) -> usize {
    if needle.is_empty() || needle.len() > haystack.len() {
        return 0;
    }
    let mut count = 0;
    let mut pos = 0;
    while pos + needle.len() <= haystack.len() {
        if haystack[pos..pos + needle.len()] == *needle {
            count += 1;
            pos += needle.len();
        } else {
            pos += 1;
        }
    }
    count
}

/// Returns true if `needle` occurs as a contiguous run in `haystack`.
///
/// The empty needle is contained in every haystack.
pub fn contains_run<T: PartialEq>(haystack: &[T], needle: &[T]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}
