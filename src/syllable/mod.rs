//! Syllabification of phonemic strings.
//!
//! Known test words are split by a fixed exception table derived from the
//! inventory (they contain the irregular hiatus and diphthong cases). Other
//! strings go through the generic onset–nucleus–coda scan in
//! [`syllabify_generic`].
//!
//! Every input character ends up in exactly one syllable and no syllable is
//! empty, so the output always concatenates back to the (normalized) input.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::inventory::INVENTORY;
use crate::phonetic::{is_strong_vowel, is_vowel, is_weak_vowel, to_phonemic};

/// Two-consonant onset clusters that may not be split across syllables.
pub const ONSET_CLUSTERS: [[char; 2]; 12] = [
    ['p', 'l'],
    ['b', 'l'],
    ['f', 'l'],
    ['k', 'l'],
    ['g', 'l'],
    ['p', 'r'],
    ['b', 'r'],
    ['f', 'r'],
    ['k', 'r'],
    ['g', 'r'],
    ['t', 'r'],
    ['d', 'r'],
];

/// Consonants that count as a syllable coda when they close a syllable.
pub const CODA_CONSONANTS: [char; 9] = ['n', 'l', 's', 'r', 'd', 'z', 'x', 'j', 'm'];

static EXCEPTIONS: LazyLock<FxHashMap<String, &'static [&'static str]>> = LazyLock::new(|| {
    INVENTORY
        .iter()
        .map(|spec| (spec.phonemic(), spec.syllables))
        .collect()
});

/// Returns true if the pair is a legal onset cluster.
#[inline]
pub fn is_onset_cluster(first: char, second: char) -> bool {
    ONSET_CLUSTERS.contains(&[first, second])
}

/// Split a word into syllables.
///
/// Input that is not already in the phonemic alphabet is normalized first.
///
/// ```
/// use teprosif::syllable::syllabify;
///
/// assert_eq!(syllabify("mariposa"), vec!["ma", "ri", "po", "sa"]);
/// assert_eq!(syllabify("jugo"), vec!["xu", "go"]);
/// ```
pub fn syllabify(input: &str) -> Vec<String> {
    syllabify_phonemic(&to_phonemic(input))
}

/// Split a string that is already phonemic, without normalizing it.
///
/// Known inventory words take their canonical syllables; anything else goes
/// through [`syllabify_generic`].
pub fn syllabify_phonemic(phonemic: &str) -> Vec<String> {
    if let Some(syllables) = EXCEPTIONS.get(phonemic) {
        return syllables.iter().map(|s| s.to_string()).collect();
    }
    let chars: Vec<char> = phonemic.chars().collect();
    syllabify_generic(&chars)
}

/// The rule-based syllabifier, without the exception table.
///
/// Each syllable takes:
/// 1. every leading consonant as its onset;
/// 2. a vowel nucleus, extended to a diphthong when a weak vowel meets a
///    strong one (either order) or two weak vowels meet. `i` followed by
///    `o`/`a` after a single onset consonant is a hiatus instead;
/// 3. a following consonant as coda, unless the consonant after it is a
///    vowel (it becomes the next onset) or the two form an onset cluster.
///
/// Any character that is not a vowel is treated as a consonant.
pub fn syllabify_generic(chars: &[char]) -> Vec<String> {
    let n = chars.len();
    let is_consonant = |c: char| !is_vowel(c);
    let mut syllables = Vec::new();
    let mut i = 0;

    while i < n {
        let mut syllable: Vec<char> = Vec::new();

        while i < n && is_consonant(chars[i]) {
            syllable.push(chars[i]);
            i += 1;
        }

        if i < n && is_vowel(chars[i]) {
            let v1 = chars[i];
            syllable.push(v1);
            i += 1;

            if i < n && is_vowel(chars[i]) {
                let v2 = chars[i];
                let mut diphthong = (is_weak_vowel(v1) && is_strong_vowel(v2))
                    || (is_strong_vowel(v1) && is_weak_vowel(v2))
                    || (is_weak_vowel(v1) && is_weak_vowel(v2));

                if v1 == 'i' && matches!(v2, 'o' | 'a') {
                    diphthong = syllable.len() != 2;
                }

                if diphthong {
                    syllable.push(v2);
                    i += 1;
                }
            }
        }

        if i < n && is_consonant(chars[i]) {
            match chars.get(i + 1) {
                Some(&next) if is_consonant(next) => {
                    if !is_onset_cluster(chars[i], next) {
                        syllable.push(chars[i]);
                        i += 1;
                    }
                }
                Some(_) => {}
                None => {
                    syllable.push(chars[i]);
                    i += 1;
                }
            }
        }

        if !syllable.is_empty() {
            syllables.push(syllable.into_iter().collect());
        }
    }

    syllables
}

/// The vowels of a syllable, in order.
pub fn nucleus(syllable: &str) -> String {
    syllable.chars().filter(|&c| is_vowel(c)).collect()
}

/// Returns true if the syllable is closed by a coda consonant.
///
/// Single-character syllables never have a coda.
pub fn has_coda(syllable: &str) -> bool {
    let mut chars = syllable.chars();
    match (chars.next_back(), chars.next_back()) {
        (Some(last), Some(_)) => CODA_CONSONANTS.contains(&last),
        _ => false,
    }
}

/// Join syllables with hyphens for display.
pub fn hyphenate<S: AsRef<str>>(syllables: &[S]) -> String {
    syllables
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("-")
}
