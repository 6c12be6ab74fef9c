//! End-to-end scenarios: from spellings to process codes to a diagnosis.

use teprosif::prelude::*;
use teprosif::process::ProcessCode::*;

#[test]
fn test_mariposa_normalizes_and_syllabifies() {
    assert_eq!(normalize("mariposa"), "mariposa");
    assert_eq!(syllabify("mariposa"), vec!["ma", "ri", "po", "sa"]);
}

#[test]
fn test_jugo_normalizes_and_syllabifies() {
    assert_eq!(normalize("jugo"), "xugo");
    assert_eq!(syllabify("jugo"), vec!["xu", "go"]);
}

#[test]
fn test_tren_cluster_reduction() {
    let result = analyze_pair("tren", "ten", None).processes;
    assert!(result.contains(ClusterReduction));
    assert!(!result.contains(DiphthongReduction));
    assert!(!result.contains(CodaDeletion));

    let item = analyze_item(22, "ten").unwrap().processes;
    assert!(item.contains(ClusterReduction));
    assert!(!item.contains(DiphthongReduction));
    assert!(!item.contains(CodaDeletion));
}

#[test]
fn test_auto_diphthong_reduction() {
    let result = analyze_pair("auto", "ato", None).processes;
    assert!(result.contains(DiphthongReduction));
}

#[test]
fn test_guitarra_devoicing_and_liquid_substitution() {
    for analysis in [
        analyze_pair("guitarra", "kitara", None),
        analyze_item(33, "kitara").unwrap(),
    ] {
        let result = &analysis.processes;
        assert!(result.contains(Devoicing), "{:?}", result);
        assert!(result.contains(LiquidForLiquid), "{:?}", result);
    }
}

#[test]
fn test_diagnosis_normal_at_four() {
    assert_eq!(classify(10, 4, TestMode::Full), Some(Category::Normal));
    let diagnosis = diagnose(ClassTotals::new(4, 3, 3), 4, TestMode::Full);
    assert_eq!(diagnosis.category(), Some(Category::Normal));
    assert!(diagnosis.z_score().unwrap() < 0.0);
}

#[test]
fn test_identical_productions() {
    for spec in INVENTORY.iter() {
        let analysis = analyze_item(spec.number, spec.word).unwrap();
        assert!(analysis.is_correct(), "{}", spec.word);
        assert!(analysis.processes.is_empty(), "{}", spec.word);
    }
}

#[test]
fn test_orthographic_production_is_normalized() {
    // "jirafa" spelled as heard: "girafa" normalizes to the target
    let analysis = analyze_item(29, "girafa").unwrap();
    assert_eq!(analysis.produced, "xirafa");
    assert!(analysis.is_correct());
}

#[test]
fn test_short_form_session() {
    let mut form = Form::new(TestMode::Short);
    form.record_transcription(1, "pansa").unwrap();
    form.record_transcription(3, "mapoza").unwrap();
    form.record_transcription(16, "ato").unwrap_err();
    form.record(2, ItemResponse::NoResponse).unwrap();
    for item in 4..=15 {
        let spec = word_spec(item).unwrap();
        form.record_transcription(item, spec.word).unwrap();
    }

    let summary = form.summary(5);
    assert_eq!(summary.correct_items, 12);
    assert_eq!(summary.unscored_items, 1);
    assert!(summary.scored_items <= 2);
    assert_eq!(summary.pending_items, 0);
    assert_eq!(summary.diagnosis.category(), Some(Category::Normal));
}

#[test]
fn test_heavy_session_is_deficit() {
    let mut form = Form::new(TestMode::Full);
    for spec in INVENTORY.iter() {
        form.record(
            spec.number,
            ItemResponse::Produced {
                transcription: String::new(),
                totals: ClassTotals::new(1, 1, 1),
            },
        )
        .unwrap();
    }
    let summary = form.summary(6);
    assert_eq!(summary.totals.total(), 111);
    assert_eq!(summary.diagnosis.category(), Some(Category::Deficit));
    let assessment = summary.diagnosis.assessment().unwrap();
    assert!(assessment.structure_predominant);
}
