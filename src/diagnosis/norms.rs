//! Age-band norm tables for both test modes.
//!
//! Each band gives the highest total still considered normal and the highest
//! total still considered at risk. Full-mode bands also carry the published
//! mean and standard deviation of every category, used for z-scores.
//!
//! The built-in table is the default; a replacement can be loaded from JSON:
//!
//! ```json
//! {
//!   "full":  [{ "age": 3, "normal_max": 42, "risk_max": 57, "stats": { ... } }, ...],
//!   "short": [{ "age": 3, "normal_max": 28, "risk_max": 38 }, ...]
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::inventory::TestMode;

/// Youngest supported age band.
pub const MIN_AGE: u32 = 3;

/// Oldest supported age band.
pub const MAX_AGE: u32 = 6;

/// Mean and standard deviation of a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    /// Mean
    pub mean: f64,
    /// Standard deviation
    pub sd: f64,
}

impl Stat {
    const fn new(mean: f64, sd: f64) -> Self {
        Self { mean, sd }
    }

    fn has_spread(&self) -> bool {
        self.sd.is_finite() && self.sd > 0.0
    }

    /// Signed distance of `score` from the mean, in standard deviations.
    pub fn z(&self, score: u32) -> f64 {
        (f64::from(score) - self.mean) / self.sd
    }
}

/// Published statistics of one age band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// All processes
    pub total: Stat,
    /// Structure (E) processes
    pub structure: Stat,
    /// Assimilation (A) processes
    pub assimilation: Stat,
    /// Substitution (S) processes
    pub substitution: Stat,
}

impl CategoryStats {
    fn all(&self) -> [Stat; 4] {
        [self.total, self.structure, self.assimilation, self.substitution]
    }
}

/// Cutoffs (and optional statistics) for one age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormBand {
    /// Age in years
    pub age: u32,
    /// Highest normal total
    pub normal_max: u32,
    /// Highest at-risk total
    pub risk_max: u32,
    /// Means and deviations per category, where published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<CategoryStats>,
}

/// Norm bands for both test modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormTable {
    /// Bands for the complete test
    pub full: Vec<NormBand>,
    /// Bands for the screening
    pub short: Vec<NormBand>,
}

const fn band(age: u32, normal_max: u32, risk_max: u32, stats: Option<CategoryStats>) -> NormBand {
    NormBand {
        age,
        normal_max,
        risk_max,
        stats,
    }
}

const fn stats(total: (f64, f64), e: (f64, f64), a: (f64, f64), s: (f64, f64)) -> CategoryStats {
    CategoryStats {
        total: Stat::new(total.0, total.1),
        structure: Stat::new(e.0, e.1),
        assimilation: Stat::new(a.0, a.1),
        substitution: Stat::new(s.0, s.1),
    }
}

static BUILTIN: LazyLock<NormTable> = LazyLock::new(|| NormTable {
    full: vec![
        band(3, 42, 57, Some(stats((27.0, 15.1), (14.7, 8.6), (6.3, 4.8), (5.9, 4.2)))),
        band(4, 23, 33, Some(stats((13.4, 10.0), (7.2, 6.4), (2.9, 2.7), (3.3, 2.9)))),
        band(5, 14, 21, Some(stats((7.9, 6.4), (4.1, 3.7), (1.9, 2.0), (1.7, 1.9)))),
        band(6, 10, 15, Some(stats((4.9, 5.1), (2.6, 3.3), (1.0, 1.2), (1.2, 1.8)))),
    ],
    short: vec![
        band(3, 28, 38, None),
        band(4, 15, 21, None),
        band(5, 10, 14, None),
        band(6, 7, 11, None),
    ],
});

impl Default for NormTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl NormTable {
    /// The built-in table, without cloning.
    pub fn builtin() -> &'static NormTable {
        &BUILTIN
    }

    /// Bands of one mode.
    pub fn bands(&self, mode: TestMode) -> &[NormBand] {
        match mode {
            TestMode::Full => &self.full,
            TestMode::Short => &self.short,
        }
    }

    /// The band for `age` (clamped to the supported range) in `mode`.
    pub fn band(&self, age: u32, mode: TestMode) -> Option<&NormBand> {
        let age = clamp_age(age);
        self.bands(mode).iter().find(|b| b.age == age)
    }

    /// Check cutoff ordering, statistics and duplicate ages.
    pub fn validate(&self) -> Result<()> {
        for mode in [TestMode::Full, TestMode::Short] {
            let bands = self.bands(mode);
            for (i, b) in bands.iter().enumerate() {
                if b.risk_max < b.normal_max {
                    return Err(Error::InvalidNormTable(format!(
                        "{} age {}: risk_max {} is below normal_max {}",
                        mode, b.age, b.risk_max, b.normal_max
                    )));
                }
                if bands[..i].iter().any(|other| other.age == b.age) {
                    return Err(Error::InvalidNormTable(format!(
                        "{} age {} listed twice",
                        mode, b.age
                    )));
                }
                let bad_sd = b
                    .stats
                    .is_some_and(|s| s.all().iter().any(|stat| !stat.has_spread()));
                if bad_sd {
                    return Err(Error::InvalidNormTable(format!(
                        "{} age {}: standard deviations must be positive",
                        mode, b.age
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parse and validate a table from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: NormTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Load and validate a table from a JSON file.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::NormFileIo {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&text)?;
        info!(
            path = %path.display(),
            full_bands = table.full.len(),
            short_bands = table.short.len(),
            "loaded norm table"
        );
        Ok(table)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Clamp an age in years to the supported bands.
#[inline]
pub fn clamp_age(age: u32) -> u32 {
    age.clamp(MIN_AGE, MAX_AGE)
}
