//! Norm-referenced diagnosis of session totals.
//!
//! A session's scores are summed per class into [`ClassTotals`]. The total is
//! compared against the cutoffs of the child's age band (ages clamped to
//! 3-6) for the administered [`TestMode`]:
//!
//! - total ≤ normal cutoff: [`Category::Normal`]
//! - total ≤ risk cutoff: [`Category::Risk`]
//! - otherwise: [`Category::Deficit`]
//!
//! Full-mode bands also carry published means and standard deviations, so
//! the result adds z-scores for the total and each class.
//!
//! # Example
//!
//! ```
//! use teprosif::diagnosis::{classify, Category};
//! use teprosif::inventory::TestMode;
//!
//! assert_eq!(classify(10, 4, TestMode::Full), Some(Category::Normal));
//! assert_eq!(classify(30, 4, TestMode::Full), Some(Category::Risk));
//! assert_eq!(classify(30, 4, TestMode::Short), Some(Category::Deficit));
//! ```

pub mod age;
pub mod norms;

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use age::Age;
pub use norms::{clamp_age, CategoryStats, NormBand, NormTable, Stat, MAX_AGE, MIN_AGE};

use crate::inventory::TestMode;
use crate::process::{ProcessClass, ProcessResult};

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Within the expected range for the age
    Normal,
    /// Above the normal cutoff
    Risk,
    /// Above the risk cutoff
    Deficit,
}

impl Category {
    /// Clinical label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Normal => "NORMAL",
            Category::Risk => "RIESGO",
            Category::Deficit => "DÉFICIT",
        }
    }

    /// Interpretation of a z-score: above 2 is a deficit, above 1 a risk.
    pub fn from_z(z: f64) -> Category {
        if z > 2.0 {
            Category::Deficit
        } else if z > 1.0 {
            Category::Risk
        } else {
            Category::Normal
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Totals
// ============================================================================

/// Scores summed per process class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTotals {
    /// Structure (E) processes
    pub structure: u32,
    /// Assimilation (A) processes
    pub assimilation: u32,
    /// Substitution (S) processes
    pub substitution: u32,
}

impl ClassTotals {
    /// Totals from per-class scores.
    pub fn new(structure: u32, assimilation: u32, substitution: u32) -> Self {
        Self {
            structure,
            assimilation,
            substitution,
        }
    }

    /// One point per distinct detected code.
    pub fn from_result(result: &ProcessResult) -> Self {
        let count = |class| result.count_class(class) as u32;
        Self::new(
            count(ProcessClass::Structure),
            count(ProcessClass::Assimilation),
            count(ProcessClass::Substitution),
        )
    }

    /// Sum over all classes.
    pub fn total(&self) -> u32 {
        self.structure + self.assimilation + self.substitution
    }

    /// Score of one class.
    pub fn get(&self, class: ProcessClass) -> u32 {
        match class {
            ProcessClass::Structure => self.structure,
            ProcessClass::Assimilation => self.assimilation,
            ProcessClass::Substitution => self.substitution,
        }
    }
}

impl From<&ProcessResult> for ClassTotals {
    fn from(result: &ProcessResult) -> Self {
        Self::from_result(result)
    }
}

impl Add for ClassTotals {
    type Output = ClassTotals;

    fn add(self, rhs: ClassTotals) -> ClassTotals {
        ClassTotals::new(
            self.structure + rhs.structure,
            self.assimilation + rhs.assimilation,
            self.substitution + rhs.substitution,
        )
    }
}

impl AddAssign for ClassTotals {
    fn add_assign(&mut self, rhs: ClassTotals) {
        *self = *self + rhs;
    }
}

impl Sum for ClassTotals {
    fn sum<I: Iterator<Item = ClassTotals>>(iter: I) -> Self {
        iter.fold(ClassTotals::default(), Add::add)
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// A score set against its norm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryScore {
    /// Observed score
    pub score: u32,
    /// Normative mean
    pub mean: f64,
    /// Normative standard deviation
    pub sd: f64,
    /// Standardized score
    pub z: f64,
    /// Category implied by `z`
    pub interpretation: Category,
}

impl CategoryScore {
    fn new(score: u32, stat: Stat) -> Self {
        let z = stat.z(score);
        Self {
            score,
            mean: stat.mean,
            sd: stat.sd,
            z,
            interpretation: Category::from_z(z),
        }
    }
}

/// Per-category comparison with the published statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakdown {
    /// All processes
    pub total: CategoryScore,
    /// Structure (E) processes
    pub structure: CategoryScore,
    /// Assimilation (A) processes
    pub assimilation: CategoryScore,
    /// Substitution (S) processes
    pub substitution: CategoryScore,
}

impl Breakdown {
    fn new(totals: &ClassTotals, stats: &CategoryStats) -> Self {
        Self {
            total: CategoryScore::new(totals.total(), stats.total),
            structure: CategoryScore::new(totals.structure, stats.structure),
            assimilation: CategoryScore::new(totals.assimilation, stats.assimilation),
            substitution: CategoryScore::new(totals.substitution, stats.substitution),
        }
    }
}

/// A scored diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Category from the band cutoffs
    pub category: Category,
    /// Mode the totals were collected in
    pub mode: TestMode,
    /// Age band used, after clamping
    pub age_band: u32,
    /// Per-class scores
    pub totals: ClassTotals,
    /// Sum of the per-class scores
    pub total: u32,
    /// z-score of the total, when the band has statistics
    pub z_score: Option<f64>,
    /// Per-category comparison, when the band has statistics
    pub breakdown: Option<Breakdown>,
    /// Structure processes lie more than two deviations above the mean
    pub structure_predominant: bool,
}

/// Result of a diagnosis lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Diagnosis {
    /// No norm band exists for the age and mode
    NoData {
        /// Requested age in years
        age: u32,
        /// Requested mode
        mode: TestMode,
    },
    /// Totals scored against a band
    Scored(Assessment),
}

impl Diagnosis {
    /// Category, if scored.
    pub fn category(&self) -> Option<Category> {
        match self {
            Diagnosis::Scored(a) => Some(a.category),
            Diagnosis::NoData { .. } => None,
        }
    }

    /// z-score of the total, if scored against statistics.
    pub fn z_score(&self) -> Option<f64> {
        match self {
            Diagnosis::Scored(a) => a.z_score,
            Diagnosis::NoData { .. } => None,
        }
    }

    /// The scored assessment, if any.
    pub fn assessment(&self) -> Option<&Assessment> {
        match self {
            Diagnosis::Scored(a) => Some(a),
            Diagnosis::NoData { .. } => None,
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnosis::NoData { .. } => f.write_str("Sin Datos"),
            Diagnosis::Scored(a) => match a.z_score {
                Some(z) => write!(f, "{} ({:+.2} DE)", a.category, z),
                None => write!(f, "{}", a.category),
            },
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

impl NormTable {
    /// Category of a total score, or `None` if no band exists.
    pub fn classify(&self, total: u32, age: u32, mode: TestMode) -> Option<Category> {
        let band = self.band(age, mode)?;
        Some(if total <= band.normal_max {
            Category::Normal
        } else if total <= band.risk_max {
            Category::Risk
        } else {
            Category::Deficit
        })
    }

    /// Full diagnosis of a session's totals.
    pub fn diagnose(&self, totals: ClassTotals, age: u32, mode: TestMode) -> Diagnosis {
        let total = totals.total();
        let (Some(band), Some(category)) = (self.band(age, mode), self.classify(total, age, mode))
        else {
            warn!(age, %mode, "no norm band for diagnosis");
            return Diagnosis::NoData { age, mode };
        };

        let breakdown = match mode {
            TestMode::Full => band.stats.map(|stats| Breakdown::new(&totals, &stats)),
            TestMode::Short => None,
        };

        Diagnosis::Scored(Assessment {
            category,
            mode,
            age_band: band.age,
            totals,
            total,
            z_score: breakdown.map(|b| b.total.z),
            structure_predominant: breakdown.is_some_and(|b| b.structure.z > 2.0),
            breakdown,
        })
    }
}

/// [`NormTable::classify`] against the built-in norms.
pub fn classify(total: u32, age: u32, mode: TestMode) -> Option<Category> {
    NormTable::builtin().classify(total, age, mode)
}

/// [`NormTable::diagnose`] against the built-in norms.
pub fn diagnose(totals: ClassTotals, age: u32, mode: TestMode) -> Diagnosis {
    NormTable::builtin().diagnose(totals, age, mode)
}
