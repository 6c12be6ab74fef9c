//! Process detection for one target/produced word pair.
//!
//! Each sub-detector looks at the pair independently and pushes codes into a
//! shared [`TagSet`]; the set keeps only the first occurrence of each code.
//! Detectors run in a fixed order, which fixes the order of the result:
//!
//! 1. cluster reduction
//! 2. coda deletion
//! 3. stressed and unstressed syllable deletion
//! 4. coalescence
//! 5. metathesis
//! 6. diphthong reduction
//! 7. syllabic assimilation
//! 8. addition (suppressed by syllabic assimilation)
//! 9. the substitution scan over the alignment's replaced runs

use serde::Serialize;
use tracing::{debug, warn};

use super::code::ProcessCode;
use super::features::classify;
use super::tags::{ProcessResult, TagSet};
use crate::alignment::{mark_pair, opcodes, MarkedPair, OpTag};
use crate::inventory::{word_spec, WordSpec};
use crate::phonetic::{contains_run, count_occurrences, features, is_vowel, to_phonemic, Zone};
use crate::syllable::{has_coda, nucleus, syllabify_phonemic, ONSET_CLUSTERS};

/// Vowel pairs checked for diphthong reduction, in priority order.
pub const DIPHTHONGS: [[char; 2]; 14] = [
    ['a', 'i'],
    ['a', 'u'],
    ['e', 'i'],
    ['e', 'u'],
    ['o', 'i'],
    ['o', 'u'],
    ['i', 'a'],
    ['i', 'e'],
    ['i', 'o'],
    ['i', 'u'],
    ['u', 'a'],
    ['u', 'e'],
    ['u', 'i'],
    ['u', 'o'],
];

/// A word pair prepared for detection.
struct Pair<'a> {
    target: Vec<char>,
    produced: Vec<char>,
    target_syllables: Vec<String>,
    produced_syllables: Vec<String>,
    spec: Option<&'a WordSpec>,
}

impl<'a> Pair<'a> {
    fn new(target: &str, produced: &str, spec: Option<&'a WordSpec>) -> Self {
        let target_syllables = match spec {
            Some(spec) => spec.syllable_vec(),
            None => syllabify_phonemic(target),
        };
        Self {
            target: target.chars().collect(),
            produced: produced.chars().collect(),
            target_syllables,
            produced_syllables: syllabify_phonemic(produced),
            spec,
        }
    }
}

// ============================================================================
// Structure
// ============================================================================

fn cluster_reduction(pair: &Pair<'_>, tags: &mut TagSet) {
    for cluster in &ONSET_CLUSTERS {
        let in_target = count_occurrences(&pair.target, cluster);
        let in_produced = count_occurrences(&pair.produced, cluster);
        if in_produced < in_target {
            tags.push_n(ProcessCode::ClusterReduction, in_target - in_produced);
        }
    }
}

fn coda_deletion(pair: &Pair<'_>, tags: &mut TagSet) {
    let codas = |syllables: &[String]| syllables.iter().filter(|s| has_coda(s)).count();
    let target = codas(&pair.target_syllables);
    let produced = codas(&pair.produced_syllables);
    tags.push_n(ProcessCode::CodaDeletion, target.saturating_sub(produced));
}

fn syllable_deletion(pair: &Pair<'_>, tags: &mut TagSet) {
    let target = pair.target_syllables.len();
    let produced = pair.produced_syllables.len();
    if produced >= target {
        return;
    }
    let mut missing = target - produced;

    let stressed = pair.spec.and_then(|spec| spec.stressed_syllable());
    if let Some(syllable) = stressed {
        let core: Vec<char> = nucleus(syllable).chars().collect();
        if !contains_run(&pair.produced, &core) {
            tags.push(ProcessCode::StressedDeletion);
            missing -= 1;
        }
    }
    tags.push_n(ProcessCode::UnstressedDeletion, missing);
}

/// Lock-step scan: on a mismatch, a two-symbol target window that does not
/// occur in the produced word is taken to have merged into one symbol.
fn coalescence(pair: &Pair<'_>, tags: &mut TagSet) {
    let (target, produced) = (&pair.target, &pair.produced);
    let (mut i, mut j) = (0, 0);
    while i < target.len() && j < produced.len() {
        if target[i] != produced[j] && i + 1 < target.len() {
            let window = &target[i..i + 2];
            if !contains_run(produced, window) {
                tags.push(ProcessCode::Coalescence);
                i += 2;
                j += 1;
                continue;
            }
        }
        i += 1;
        j += 1;
    }
}

fn metathesis(pair: &Pair<'_>, tags: &mut TagSet) {
    let nuclei = |syllables: &[String]| -> Vec<String> {
        syllables.iter().map(|s| nucleus(s)).collect()
    };
    let target = nuclei(&pair.target_syllables);
    let produced = nuclei(&pair.produced_syllables);

    let swapped = target.windows(2).zip(produced.windows(2)).any(|(t, p)| {
        t[0] != t[1] && t[0] == p[1] && t[1] == p[0]
    });
    if swapped {
        tags.push(ProcessCode::Metathesis);
        return;
    }

    if pair.target.len() == pair.produced.len() && pair.target != pair.produced {
        let mut t = pair.target.clone();
        let mut p = pair.produced.clone();
        t.sort_unstable();
        p.sort_unstable();
        if t == p {
            tags.push(ProcessCode::Metathesis);
        }
    }
}

fn diphthong_reduction(pair: &Pair<'_>, tags: &mut TagSet) {
    let produced = &pair.produced;
    let lost = DIPHTHONGS.iter().find(|dip| {
        contains_run(&pair.target, &dip[..])
            && !contains_run(produced, &dip[..])
            && (produced.contains(&dip[0]) != produced.contains(&dip[1]))
    });
    if lost.is_some() {
        tags.push(ProcessCode::DiphthongReduction);
    }
}

/// The first two produced syllables are identical while the item's first two
/// are not. Needs the inventory entry.
fn syllabic_assimilation(pair: &Pair<'_>, tags: &mut TagSet) {
    let Some(spec) = pair.spec else {
        return;
    };
    let produced = &pair.produced_syllables;
    if produced.len() >= 2
        && produced[0] == produced[1]
        && spec.syllables.len() >= 2
        && spec.syllables[0] != spec.syllables[1]
    {
        tags.push(ProcessCode::SyllabicAssimilation);
    }
}

fn addition(pair: &Pair<'_>, tags: &mut TagSet) {
    let longer = pair.produced.len() > pair.target.len();
    if longer && !tags.contains(ProcessCode::SyllabicAssimilation) {
        tags.push(ProcessCode::Addition);
    }
}

// ============================================================================
// Assimilation and substitution
// ============================================================================

fn is_assimilation(target: &[char], produced: &[char], p: char) -> bool {
    let in_produced = produced.iter().filter(|&&c| c == p).count();
    let in_target = target.iter().filter(|&&c| c == p).count();
    in_target > 0 || (in_produced > 1 && in_target < in_produced)
}

fn assimilation_codes(m: char, p: char, produced: &[char], tags: &mut TagSet) {
    if !is_vowel(p) {
        tags.push(ProcessCode::IdentityAssimilation);
    }
    let fm = features(m);
    let Some(fp) = features(p) else {
        return;
    };
    let by_zone = match fp.zone {
        Zone::Labial => Some(ProcessCode::LabialAssimilation),
        Zone::Dental => Some(ProcessCode::DentalAssimilation),
        Zone::Palatal => Some(ProcessCode::PalatalAssimilation),
        Zone::Velar => Some(ProcessCode::VelarAssimilation),
        Zone::Central | Zone::Glottal => None,
    };
    tags.extend(by_zone);

    let other_with = |pred: fn(char) -> bool| produced.iter().any(|&c| c != p && pred(c));
    if fp.is_liquid() && !fm.is_some_and(|f| f.is_liquid()) {
        if other_with(|c| features(c).is_some_and(|f| f.is_liquid())) {
            tags.push(ProcessCode::LiquidAssimilation);
        } else {
            tags.push(ProcessCode::NonLiquidToLiquid);
        }
    }
    if fp.is_nasal() && !fm.is_some_and(|f| f.is_nasal()) {
        if other_with(|c| features(c).is_some_and(|f| f.is_nasal())) {
            tags.push(ProcessCode::NasalAssimilation);
        } else {
            tags.push(ProcessCode::Nasalization);
        }
    }
}

/// Walk the replaced runs of the alignment, pairing symbols by position.
fn substitution_scan(pair: &Pair<'_>, tags: &mut TagSet) {
    let (target, produced) = (&pair.target, &pair.produced);
    for op in opcodes(target, produced) {
        if op.tag != OpTag::Replace {
            continue;
        }
        let left = &target[op.a.clone()];
        let right = &produced[op.b.clone()];
        for (k, (&m, &p)) in left.iter().zip(right).enumerate() {
            if m == p {
                continue;
            }
            if is_assimilation(target, produced, p) {
                assimilation_codes(m, p, produced, tags);
            } else {
                tags.extend(classify(m, p, produced, op.b.start + k));
            }
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Detect the processes relating two phonemic strings.
///
/// `spec` supplies the canonical syllables and stress of an inventory item;
/// without it the target is syllabified generically and the stress- and
/// syllable-assimilation checks are skipped. Identical strings yield an
/// empty result.
pub fn detect(target: &str, produced: &str, spec: Option<&WordSpec>) -> ProcessResult {
    if target == produced {
        return ProcessResult::default();
    }
    let pair = Pair::new(target, produced, spec);
    let mut tags = TagSet::new();

    cluster_reduction(&pair, &mut tags);
    coda_deletion(&pair, &mut tags);
    syllable_deletion(&pair, &mut tags);
    coalescence(&pair, &mut tags);
    metathesis(&pair, &mut tags);
    diphthong_reduction(&pair, &mut tags);
    syllabic_assimilation(&pair, &mut tags);
    addition(&pair, &mut tags);
    substitution_scan(&pair, &mut tags);

    let result = tags.into_result();
    debug!(word = target, produced, codes = ?result.tags(), "analysed word pair");
    result
}

/// Everything computed for one transcription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordAnalysis {
    /// Inventory item number, when analysed against an item
    pub item: Option<u8>,
    /// Phonemic target
    pub target: String,
    /// Phonemic production
    pub produced: String,
    /// Syllables of the target
    pub target_syllables: Vec<String>,
    /// Syllables of the production
    pub produced_syllables: Vec<String>,
    /// Index of the stressed target syllable, when known
    pub stressed: Option<usize>,
    /// Detected processes
    pub processes: ProcessResult,
    /// Marked display of the alignment
    pub markup: MarkedPair,
    /// Set when the production is more than twice or less than half the
    /// target's length
    pub implausible: bool,
}

impl WordAnalysis {
    /// Returns true if the production matches the target.
    pub fn is_correct(&self) -> bool {
        self.target == self.produced
    }
}

/// Returns true if `produced` is suspiciously long or short for `target`.
pub fn is_implausible(target: &str, produced: &str) -> bool {
    let t = target.chars().count();
    let p = produced.chars().count();
    p > 2 * t || 2 * p < t
}

/// Analyse an arbitrary target/produced pair.
///
/// Both strings are normalized unless already phonemic.
pub fn analyze_pair(target: &str, produced: &str, spec: Option<&WordSpec>) -> WordAnalysis {
    let target = to_phonemic(target);
    let produced = to_phonemic(produced);
    let processes = detect(&target, &produced, spec);

    WordAnalysis {
        item: spec.map(|s| s.number),
        target_syllables: match spec {
            Some(spec) => spec.syllable_vec(),
            None => syllabify_phonemic(&target),
        },
        produced_syllables: syllabify_phonemic(&produced),
        stressed: spec.map(|s| s.stressed),
        markup: mark_pair(&target, &produced),
        implausible: is_implausible(&target, &produced),
        processes,
        target,
        produced,
    }
}

/// Analyse a production of inventory item `number`.
///
/// Returns `None` for an unknown item.
///
/// ```
/// use teprosif::process::{analyze_item, ProcessCode};
///
/// let analysis = analyze_item(16, "ato").unwrap();
/// assert_eq!(analysis.target, "auto");
/// assert!(analysis.processes.contains(ProcessCode::DiphthongReduction));
/// ```
pub fn analyze_item(number: u8, produced: &str) -> Option<WordAnalysis> {
    let Some(spec) = word_spec(number) else {
        warn!(item = number, "unknown inventory item");
        return None;
    };
    Some(analyze_pair(&spec.phonemic(), produced, Some(spec)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProcessCode::*;

    fn codes(target: &str, produced: &str) -> Vec<ProcessCode> {
        detect(target, produced, None).codes().to_vec()
    }

    fn item_codes(number: u8, produced: &str) -> Vec<ProcessCode> {
        analyze_item(number, produced).unwrap().processes.codes().to_vec()
    }

    fn pair(target: &str, produced: &str) -> (Pair<'static>, TagSet) {
        (Pair::new(target, produced, None), TagSet::new())
    }

    #[test]
    fn test_identical_is_empty() {
        assert!(codes("mariposa", "mariposa").is_empty());
        assert!(codes("", "").is_empty());
        assert!(item_codes(16, "auto").is_empty());
    }

    #[test]
    fn test_cluster_reduction() {
        let result = codes("tren", "ten");
        assert!(result.contains(&ClusterReduction));
        assert!(!result.contains(&DiphthongReduction));
        assert!(!result.contains(&CodaDeletion));
        // plátano -> pátano
        assert!(item_codes(23, "pátano").contains(&ClusterReduction));
    }

    #[test]
    fn test_cluster_changed_or_kept() {
        let (p, mut tags) = pair("tren", "tden");
        cluster_reduction(&p, &mut tags);
        assert!(tags.contains(ClusterReduction));

        let (p, mut tags) = pair("kabra", "kabla");
        cluster_reduction(&p, &mut tags);
        assert!(tags.contains(ClusterReduction));

        let (p, mut tags) = pair("tren", "tre");
        cluster_reduction(&p, &mut tags);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_cluster_reduced_once_of_two() {
        let (p, mut tags) = pair("tratro", "tatro");
        cluster_reduction(&p, &mut tags);
        assert!(tags.contains(ClusterReduction));

        let (p, mut tags) = pair("tratro", "tratro");
        cluster_reduction(&p, &mut tags);
        assert!(tags.is_empty());

        assert!(detect("tratro", "tatro", None).contains(ClusterReduction));
    }

    #[test]
    fn test_coda_deletion() {
        // pantalón -> patalón
        let (p, mut tags) = pair("pantalon", "patalon");
        coda_deletion(&p, &mut tags);
        assert!(tags.contains(CodaDeletion));

        let (p, mut tags) = pair("pantalon", "pantalo");
        coda_deletion(&p, &mut tags);
        assert!(tags.contains(CodaDeletion));

        let (p, mut tags) = pair("kasa", "kaxa");
        coda_deletion(&p, &mut tags);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_stressed_and_unstressed_deletion() {
        // mariposa (stress on "po") -> "masa": 2 syllables missing, "o" absent
        let result = item_codes(3, "masa");
        assert!(result.contains(&StressedDeletion));
        assert!(result.contains(&UnstressedDeletion));

        // mariposa -> "mapósa": stressed nucleus kept
        let result = item_codes(3, "mapósa");
        assert!(!result.contains(&StressedDeletion));
        assert!(result.contains(&UnstressedDeletion));
    }

    #[test]
    fn test_no_stress_without_item() {
        let result = codes("mariposa", "masa");
        assert!(!result.contains(&StressedDeletion));
        assert!(result.contains(&UnstressedDeletion));
    }

    #[test]
    fn test_coalescence() {
        let (p, mut tags) = pair("tren", "ken");
        coalescence(&p, &mut tags);
        assert!(tags.contains(Coalescence));

        let (p, mut tags) = pair("kasa", "kaso");
        coalescence(&p, &mut tags);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_metathesis_by_nuclei() {
        // dulce -> dulse vs dusel: nuclei u,e stay; anagram fallback catches it
        assert!(codes("dulse", "dusel").contains(&Metathesis));
        // swapped syllable nuclei
        let (p, mut tags) = pair("pato", "pota");
        metathesis(&p, &mut tags);
        assert!(tags.contains(Metathesis));
    }

    #[test]
    fn test_metathesis_needs_distinct_nuclei() {
        let (p, mut tags) = pair("kasa", "kaxa");
        metathesis(&p, &mut tags);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_diphthong_reduction() {
        assert!(codes("auto", "ato").contains(&DiphthongReduction));
        // puente -> pente
        assert!(item_codes(37, "pente").contains(&DiphthongReduction));
        // both vowels gone is not a reduction
        let (p, mut tags) = pair("auto", "oto");
        diphthong_reduction(&p, &mut tags);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_syllabic_assimilation_suppresses_addition() {
        // bufanda -> bububanda: first two syllables repeated, production longer
        let result = item_codes(6, "bububanda");
        assert!(result.contains(&SyllabicAssimilation));
        assert!(!result.contains(&Addition));
    }

    #[test]
    fn test_addition() {
        // indio -> nindio
        assert!(item_codes(17, "nindio").contains(&Addition));
        assert!(!codes("auto", "ato").contains(&Addition));
    }

    #[test]
    fn test_identity_assimilation() {
        // bufanda -> bubanda: f replaced by b, which occurs in the target
        let result = item_codes(6, "bubanda");
        assert!(result.contains(&IdentityAssimilation));
        assert!(result.contains(&LabialAssimilation));
    }

    #[test]
    fn test_liquid_assimilation() {
        // reloj -> lelox: r becomes l, which also occurs in the target
        let result = item_codes(35, "lelox");
        assert!(result.contains(&IdentityAssimilation));
        assert!(result.contains(&DentalAssimilation));
        assert!(!result.contains(&LiquidAssimilation));
    }

    #[test]
    fn test_assimilation_codes_liquid_and_nasal() {
        let produced: Vec<char> = "lalo".chars().collect();
        let mut tags = TagSet::new();
        assimilation_codes('d', 'l', &produced, &mut tags);
        assert!(tags.contains(NonLiquidToLiquid));

        let produced: Vec<char> = "lalro".chars().collect();
        let mut tags = TagSet::new();
        assimilation_codes('d', 'l', &produced, &mut tags);
        assert!(tags.contains(LiquidAssimilation));

        let produced: Vec<char> = "mano".chars().collect();
        let mut tags = TagSet::new();
        assimilation_codes('b', 'm', &produced, &mut tags);
        assert!(tags.contains(NasalAssimilation));
    }

    #[test]
    fn test_substitutions() {
        let result = item_codes(33, "kitara");
        assert!(result.contains(&Devoicing));
        assert!(result.contains(&LiquidForLiquid));

        // medial s aspirated
        assert!(codes("pasto", "pahto").contains(&Aspiration));
    }

    #[test]
    fn test_out_of_alphabet_degrades() {
        let result = codes("pato", "pa1o");
        assert!(!result.contains(&Aspiration));
        assert!(codes("", "pato").contains(&Addition));
        assert!(codes("pato", "").contains(&UnstressedDeletion));
    }

    #[test]
    fn test_unknown_item() {
        assert!(analyze_item(0, "pato").is_none());
        assert!(analyze_item(38, "pato").is_none());
    }

    #[test]
    fn test_word_analysis() {
        let analysis = analyze_item(33, "kitara").unwrap();
        assert_eq!(analysis.item, Some(33));
        assert_eq!(analysis.target, "guitaRa");
        assert_eq!(analysis.target_syllables, vec!["gui", "ta", "Ra"]);
        assert_eq!(analysis.produced_syllables, vec!["ki", "ta", "ra"]);
        assert_eq!(analysis.stressed, Some(1));
        assert!(!analysis.implausible);
        assert!(!analysis.is_correct());
        assert_eq!(analysis.markup.target_text(), "guitaRa");
    }

    #[test]
    fn test_implausible() {
        assert!(is_implausible("sol", "solsolsol"));
        assert!(is_implausible("mariposa", "ma"));
        assert!(!is_implausible("mariposa", "mapo"));
        assert!(!is_implausible("sol", "solsol"));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(item_codes(9, "efijeado"), item_codes(9, "efijeado"));
    }
}
