//! # teprosif
//!
//! Detection of phonological simplification processes in Spanish-speaking
//! children's word imitations, with norm-referenced scoring.
//!
//! A clinician presents one of 37 pictured words and transcribes what the
//! child says. For each target/production pair the engine:
//!
//! 1. normalizes both spellings into a closed phonemic alphabet
//!    ([`phonetic`]);
//! 2. splits them into syllables ([`syllable`]);
//! 3. aligns them ([`alignment`]);
//! 4. names the processes that explain the differences ([`process`]).
//!
//! Session totals per process class are then compared with age norms
//! ([`diagnosis`], [`form`]).
//!
//! ## Example
//!
//! ```
//! use teprosif::prelude::*;
//!
//! let analysis = analyze_item(33, "kitara").unwrap();
//! assert!(analysis.processes.contains(ProcessCode::Devoicing));
//! assert!(analysis.processes.contains(ProcessCode::LiquidForLiquid));
//!
//! let totals = ClassTotals::new(4, 3, 3);
//! assert_eq!(diagnose(totals, 4, TestMode::Full).category(), Some(Category::Normal));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alignment;
pub mod diagnosis;
pub mod error;
pub mod form;
pub mod inventory;
pub mod phonetic;
pub mod process;
pub mod syllable;

/// Command-line interface
#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::alignment::{mark_pair, opcodes, MarkedPair, OpTag, Opcode};
    pub use crate::diagnosis::{classify, diagnose, Age, Category, ClassTotals, Diagnosis, NormTable};
    pub use crate::error::{Error, Result};
    pub use crate::form::{Form, FormSummary, ItemResponse};
    pub use crate::inventory::{word_spec, TestMode, WordSpec, INVENTORY};
    pub use crate::phonetic::normalize;
    pub use crate::process::{
        analyze_item, analyze_pair, detect, ProcessClass, ProcessCode, ProcessResult, WordAnalysis,
    };
    pub use crate::syllable::syllabify;
}
