//! Feature-based classification of a single substituted phoneme.
//!
//! Given a target phoneme `m` and the produced phoneme `p` that replaced it,
//! [`classify`] walks [`FEATURE_RULES`] in order. Each rule inspects the pair
//! (and the vowels adjacent to `p` in the produced word) and either stays
//! silent, emits a code and lets later rules run, or emits a code and stops
//! the walk.
//!
//! Aspiration is checked before the table: a produced `h` is always
//! [`Aspiration`](ProcessCode::Aspiration), whatever the target was.

use smallvec::{smallvec, SmallVec};
use tracing::trace;

use super::code::ProcessCode;
use crate::phonetic::{features, Features, Manner, Zone, ASPIRATE};

/// Codes produced for one phoneme pair. Rarely more than three.
pub type FeatureCodes = SmallVec<[ProcessCode; 4]>;

/// A target/produced phoneme pair with its produced-word neighbourhood.
#[derive(Debug, Clone)]
pub struct PhonemePair {
    /// Target symbol
    pub target: char,
    /// Produced symbol
    pub produced: char,
    /// Target features
    pub m: Features,
    /// Produced features
    pub p: Features,
    /// Features of the in-alphabet symbols right before and after `produced`
    pub neighbors: SmallVec<[Features; 2]>,
}

impl PhonemePair {
    /// Build a pair, looking up both symbols and the neighbours of
    /// `context[index]`. Returns `None` if either symbol is outside the
    /// alphabet.
    pub fn new(target: char, produced: char, context: &[char], index: usize) -> Option<Self> {
        let m = features(target)?;
        let p = features(produced)?;
        let mut neighbors = SmallVec::new();
        if index > 0 {
            neighbors.extend(context.get(index - 1).copied().and_then(features));
        }
        if index + 1 < context.len() {
            neighbors.extend(context.get(index + 1).copied().and_then(features));
        }
        Some(Self {
            target,
            produced,
            m,
            p,
            neighbors,
        })
    }

    /// True if a neighbouring vowel sits in `zone`.
    fn has_vowel_neighbor_in(&self, zone: Zone) -> bool {
        self.neighbors.iter().any(|n| n.is_vowel() && n.zone == zone)
    }

    fn manners(&self) -> (Manner, Manner) {
        (self.m.manner, self.p.manner)
    }
}

/// What a rule decided for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Rule does not apply
    Pass,
    /// Record the code and keep evaluating
    Emit(ProcessCode),
    /// Record the code and stop
    Stop(ProcessCode),
}

/// One guarded classification rule.
#[derive(Clone, Copy)]
pub struct FeatureRule {
    /// Short name used in trace output
    pub name: &'static str,
    /// The guard and its outcome
    pub apply: fn(&PhonemePair) -> Outcome,
}

impl std::fmt::Debug for FeatureRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureRule").field("name", &self.name).finish()
    }
}

// ============================================================================
// Rules
// ============================================================================

fn vowel_assimilation(pair: &PhonemePair) -> Outcome {
    if pair.m.is_vowel()
        && pair.p.is_vowel()
        && pair.p.zone != pair.m.zone
        && pair.has_vowel_neighbor_in(pair.p.zone)
    {
        Outcome::Stop(ProcessCode::VowelAssimilation)
    } else {
        Outcome::Pass
    }
}

fn vowel_substitution(pair: &PhonemePair) -> Outcome {
    if pair.m.is_vowel() && pair.p.is_vowel() {
        Outcome::Stop(ProcessCode::VowelSubstitution)
    } else {
        Outcome::Pass
    }
}

fn velar_assimilation(pair: &PhonemePair) -> Outcome {
    if pair.p.zone == Zone::Velar && pair.has_vowel_neighbor_in(Zone::Velar) {
        Outcome::Stop(ProcessCode::VelarAssimilation)
    } else {
        Outcome::Pass
    }
}

fn palatal_assimilation(pair: &PhonemePair) -> Outcome {
    if pair.p.zone == Zone::Palatal && pair.has_vowel_neighbor_in(Zone::Palatal) {
        Outcome::Stop(ProcessCode::PalatalAssimilation)
    } else {
        Outcome::Pass
    }
}

fn affrication(pair: &PhonemePair) -> Outcome {
    match pair.manners() {
        (Manner::Fricative, Manner::Affricate) => Outcome::Emit(ProcessCode::Affrication),
        (Manner::Affricate, Manner::Fricative) => Outcome::Emit(ProcessCode::Deaffrication),
        _ => Outcome::Pass,
    }
}

fn occlusion(pair: &PhonemePair) -> Outcome {
    match pair.manners() {
        (Manner::Fricative, Manner::Occlusive) => Outcome::Emit(ProcessCode::Occlusivization),
        (Manner::Occlusive, Manner::Fricative) => Outcome::Emit(ProcessCode::Fricativization),
        _ => Outcome::Pass,
    }
}

fn nasality(pair: &PhonemePair) -> Outcome {
    match (pair.m.is_nasal(), pair.p.is_nasal()) {
        (true, false) => Outcome::Emit(ProcessCode::Oralization),
        (false, true) => Outcome::Emit(ProcessCode::Nasalization),
        _ => Outcome::Pass,
    }
}

fn liquid_lost(pair: &PhonemePair) -> Outcome {
    if !pair.m.is_liquid() || pair.p.is_liquid() {
        return Outcome::Pass;
    }
    if matches!(pair.produced, 'y' | 'w' | 'i' | 'u') {
        Outcome::Stop(ProcessCode::SemiConsonantization)
    } else {
        Outcome::Stop(ProcessCode::LiquidToNonLiquid)
    }
}

fn liquid_gained(pair: &PhonemePair) -> Outcome {
    if !pair.m.is_liquid() && pair.p.is_liquid() {
        Outcome::Stop(ProcessCode::NonLiquidToLiquid)
    } else {
        Outcome::Pass
    }
}

fn liquid_swapped(pair: &PhonemePair) -> Outcome {
    if pair.m.is_liquid() && pair.p.is_liquid() && pair.target != pair.produced {
        Outcome::Stop(ProcessCode::LiquidForLiquid)
    } else {
        Outcome::Pass
    }
}

fn voicing(pair: &PhonemePair) -> Outcome {
    match (pair.m.voiced, pair.p.voiced) {
        (true, false) => Outcome::Emit(ProcessCode::Devoicing),
        (false, true) => Outcome::Emit(ProcessCode::Voicing),
        _ => Outcome::Pass,
    }
}

fn place(pair: &PhonemePair) -> Outcome {
    use std::cmp::Ordering;

    match pair.p.zone.cmp(&pair.m.zone) {
        Ordering::Greater => Outcome::Emit(ProcessCode::Posteriorization),
        Ordering::Less if pair.p.zone == Zone::Labial => Outcome::Emit(ProcessCode::Labialization),
        Ordering::Less => Outcome::Emit(ProcessCode::Frontalization),
        Ordering::Equal => Outcome::Pass,
    }
}

/// The classification rules in evaluation order.
pub static FEATURE_RULES: &[FeatureRule] = &[
    FeatureRule { name: "vowel-assimilation", apply: vowel_assimilation },
    FeatureRule { name: "vowel-substitution", apply: vowel_substitution },
    FeatureRule { name: "velar-assimilation", apply: velar_assimilation },
    FeatureRule { name: "palatal-assimilation", apply: palatal_assimilation },
    FeatureRule { name: "affrication", apply: affrication },
    FeatureRule { name: "occlusion", apply: occlusion },
    FeatureRule { name: "nasality", apply: nasality },
    FeatureRule { name: "liquid-lost", apply: liquid_lost },
    FeatureRule { name: "liquid-gained", apply: liquid_gained },
    FeatureRule { name: "liquid-swapped", apply: liquid_swapped },
    FeatureRule { name: "voicing", apply: voicing },
    FeatureRule { name: "place", apply: place },
];

/// Classify the substitution of `target` by `produced`.
///
/// `context` is the whole produced word and `index` the position of
/// `produced` in it; only the two adjacent symbols are consulted. Symbols
/// outside the alphabet yield no codes.
///
/// # Examples
///
/// ```
/// use teprosif::process::{classify, ProcessCode};
///
/// let word: Vec<char> = "kitara".chars().collect();
/// assert_eq!(classify('g', 'k', &word, 0).as_slice(), &[ProcessCode::Devoicing]);
/// assert_eq!(classify('s', 'h', &word, 0).as_slice(), &[ProcessCode::Aspiration]);
/// assert!(classify('?', 'k', &word, 0).is_empty());
/// ```
pub fn classify(target: char, produced: char, context: &[char], index: usize) -> FeatureCodes {
    if produced == ASPIRATE {
        trace!(m = %target, p = %produced, "aspiration");
        return smallvec![ProcessCode::Aspiration];
    }
    let Some(pair) = PhonemePair::new(target, produced, context, index) else {
        return FeatureCodes::new();
    };
    classify_pair(&pair)
}

/// Run [`FEATURE_RULES`] over an already built pair.
pub fn classify_pair(pair: &PhonemePair) -> FeatureCodes {
    let mut codes = FeatureCodes::new();
    for rule in FEATURE_RULES {
        match (rule.apply)(pair) {
            Outcome::Pass => {}
            Outcome::Emit(code) => {
                trace!(rule = rule.name, code = %code, "feature rule emitted");
                codes.push(code);
            }
            Outcome::Stop(code) => {
                trace!(rule = rule.name, code = %code, "feature rule stopped");
                codes.push(code);
                break;
            }
        }
    }
    codes
}
