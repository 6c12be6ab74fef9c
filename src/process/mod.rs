//! Phonological process detection.
//!
//! A target word and a child's production are compared by several
//! independent detectors (structure, assimilation, substitution). Their
//! findings are merged into a [`ProcessResult`]: the codes from the closed
//! [`ProcessCode`] catalog, deduplicated, in detection order.
//!
//! # Usage
//!
//! ```
//! use teprosif::process::{analyze_pair, ProcessClass, ProcessCode};
//!
//! let analysis = analyze_pair("tren", "ten", None);
//! assert!(analysis.processes.contains(ProcessCode::ClusterReduction));
//! assert!(analysis.processes.count_class(ProcessClass::Structure) > 0);
//! ```

pub mod code;
pub mod detector;
pub mod features;
pub mod tags;

pub use code::{ProcessClass, ProcessCode};
pub use detector::{analyze_item, analyze_pair, detect, is_implausible, WordAnalysis, DIPHTHONGS};
pub use features::{
    classify, classify_pair, FeatureCodes, FeatureRule, Outcome, PhonemePair, FEATURE_RULES,
};
pub use tags::{ProcessResult, TagSet};
