//! Type definitions for the phonemic alphabet and its rewrite rules.
//!
//! The alphabet is closed: 24 symbols, each carrying three articulatory
//! features (place zone, manner class, voicing). Orthography is mapped onto
//! this alphabet by the ordered rules in [`super::rules`].
//!
//! Three multi-letter sounds get dedicated single symbols so that every
//! phoneme is exactly one `char`:
//!
//! - `ĉ` - the affricate written `ch`
//! - `ɲ` - the palatal nasal written `ñ`
//! - `R` - the trill written `rr`

use serde::{Deserialize, Serialize};

// ============================================================================
// Dedicated symbols
// ============================================================================

/// Voiceless palato-alveolar affricate (`ch`).
pub const AFFRICATE_CH: char = 'ĉ';

/// Palatal nasal (`ñ`).
pub const PALATAL_NASAL: char = 'ɲ';

/// Alveolar trill (`rr`, word-initial `r` is not distinguished).
pub const TRILL: char = 'R';

/// Glottal aspiration.
pub const ASPIRATE: char = 'h';

// ============================================================================
// Features
// ============================================================================

/// Coarse place-of-articulation class.
///
/// Zones are ordered from front to back, so `Ord` gives the direction of a
/// place change: a produced phoneme in a higher zone than its target has been
/// posteriorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Zone {
    /// Open central vowel /a/
    Central = 0,
    /// Bilabial and labiodental
    Labial = 1,
    /// Dental and alveolar
    Dental = 2,
    /// Palatal, including front vowels /e/ and /i/
    Palatal = 3,
    /// Velar, including back vowels /o/ and /u/
    Velar = 4,
    /// Glottal
    Glottal = 5,
}

impl Zone {
    /// The zone as its integer index (0-5).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Manner of articulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Manner {
    /// Vowel
    Vowel,
    /// Lateral or rhotic
    Liquid,
    /// Nasal stop
    Nasal,
    /// Fricative
    Fricative,
    /// Oral stop
    Occlusive,
    /// Affricate
    Affricate,
    /// Glottal aspiration
    Aspirate,
    /// Glide
    Semivowel,
}

/// Articulatory features of one phoneme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Features {
    /// Place zone
    pub zone: Zone,
    /// Manner class
    pub manner: Manner,
    /// Vocal fold vibration
    pub voiced: bool,
}

impl Features {
    const fn new(zone: Zone, manner: Manner, voiced: bool) -> Self {
        Self { zone, manner, voiced }
    }

    /// Returns true for vowels.
    #[inline]
    pub fn is_vowel(&self) -> bool {
        self.manner == Manner::Vowel
    }

    /// Returns true for liquids (/l/, /r/, /R/).
    #[inline]
    pub fn is_liquid(&self) -> bool {
        self.manner == Manner::Liquid
    }

    /// Returns true for nasals (/m/, /n/, /ɲ/).
    #[inline]
    pub fn is_nasal(&self) -> bool {
        self.manner == Manner::Nasal
    }
}

/// One entry of the phoneme table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phoneme {
    /// The symbol as it appears in phonemic strings
    pub symbol: char,
    /// Its features
    pub features: Features,
}

const fn ph(symbol: char, zone: Zone, manner: Manner, voiced: bool) -> Phoneme {
    Phoneme {
        symbol,
        features: Features::new(zone, manner, voiced),
    }
}

/// The closed phonemic alphabet.
pub const PHONEMES: [Phoneme; 24] = [
    ph('p', Zone::Labial, Manner::Occlusive, false),
    ph('b', Zone::Labial, Manner::Occlusive, true),
    ph('t', Zone::Dental, Manner::Occlusive, false),
    ph('d', Zone::Dental, Manner::Occlusive, true),
    ph('k', Zone::Velar, Manner::Occlusive, false),
    ph('g', Zone::Velar, Manner::Occlusive, true),
    ph('m', Zone::Labial, Manner::Nasal, true),
    ph('n', Zone::Dental, Manner::Nasal, true),
    ph(PALATAL_NASAL, Zone::Palatal, Manner::Nasal, true),
    ph('f', Zone::Labial, Manner::Fricative, false),
    ph('s', Zone::Dental, Manner::Fricative, false),
    ph('x', Zone::Velar, Manner::Fricative, false),
    ph(ASPIRATE, Zone::Glottal, Manner::Aspirate, false),
    ph(AFFRICATE_CH, Zone::Palatal, Manner::Affricate, false),
    ph('l', Zone::Dental, Manner::Liquid, true),
    ph('r', Zone::Dental, Manner::Liquid, true),
    ph(TRILL, Zone::Dental, Manner::Liquid, true),
    ph('y', Zone::Palatal, Manner::Fricative, true),
    ph('w', Zone::Velar, Manner::Semivowel, true),
    ph('a', Zone::Central, Manner::Vowel, true),
    ph('e', Zone::Palatal, Manner::Vowel, true),
    ph('i', Zone::Palatal, Manner::Vowel, true),
    ph('o', Zone::Velar, Manner::Vowel, true),
    ph('u', Zone::Velar, Manner::Vowel, true),
];

/// Look up the features of a phonemic symbol.
///
/// Returns `None` for anything outside the alphabet.
#[inline]
pub fn features(symbol: char) -> Option<Features> {
    PHONEMES
        .iter()
        .find(|p| p.symbol == symbol)
        .map(|p| p.features)
}

/// Returns true if `symbol` belongs to the phonemic alphabet.
#[inline]
pub fn is_phoneme(symbol: char) -> bool {
    features(symbol).is_some()
}

/// Returns true for the five vowel symbols.
#[inline]
pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Weak (closed) vowels: /i/, /u/.
#[inline]
pub fn is_weak_vowel(c: char) -> bool {
    matches!(c, 'i' | 'u')
}

/// Strong (open) vowels: /a/, /e/, /o/.
#[inline]
pub fn is_strong_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'o')
}

// ============================================================================
// Rewrite rules
// ============================================================================

/// Context in which a rewrite rule may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// No restriction
    Anywhere,
    /// The pattern must be immediately followed by one of these characters
    BeforeAny(&'static [char]),
    /// The pattern must start the word, and the word must continue past it
    WordInitial,
}

/// An orthographic rewrite rule.
///
/// Rules are plain static data; the full ordered set lives in
/// [`super::rules::NORMALIZATION_RULES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    /// Position of the rule in its rule set
    pub id: usize,
    /// Human-readable name
    pub name: &'static str,
    /// Characters to match
    pub pattern: &'static [char],
    /// Characters substituted for the match (may be empty)
    pub replacement: &'static [char],
    /// Where the rule applies
    pub context: Context,
}
