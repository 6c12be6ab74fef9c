//! Scoring a whole test session.
//!
//! A [`Form`] holds one response per administered item. Only valid
//! productions contribute points; a correct production scores zero and the
//! non-scored responses (no response, not transcribable, other word) are
//! counted separately. Folding the responses into [`ClassTotals`] does not
//! depend on item order, so it runs in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::diagnosis::{ClassTotals, Diagnosis, NormTable};
use crate::error::{Error, Result};
use crate::inventory::{TestMode, WordSpec};
use crate::process::{analyze_item, WordAnalysis};

/// The response recorded for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemResponse {
    /// Produced exactly as the target
    Correct,
    /// A transcribed production with its confirmed scores
    Produced {
        /// Phonemic transcription of the production
        transcription: String,
        /// Scores confirmed by the clinician
        totals: ClassTotals,
    },
    /// NR: the child did not answer
    NoResponse,
    /// NT: the production could not be transcribed
    NotTranscribable,
    /// OP: the child named a different word
    OtherWord,
}

impl ItemResponse {
    /// Points this response contributes.
    pub fn totals(&self) -> ClassTotals {
        match self {
            ItemResponse::Produced { totals, .. } => *totals,
            _ => ClassTotals::default(),
        }
    }

    /// Returns true for NR, NT and OP.
    pub fn is_unscored(&self) -> bool {
        matches!(
            self,
            ItemResponse::NoResponse | ItemResponse::NotTranscribable | ItemResponse::OtherWord
        )
    }

    /// Short code used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            ItemResponse::Correct => "OK",
            ItemResponse::Produced { .. } => "PSF",
            ItemResponse::NoResponse => "NR",
            ItemResponse::NotTranscribable => "NT",
            ItemResponse::OtherWord => "OP",
        }
    }
}

/// Responses for every item of one administration.
#[derive(Debug, Clone)]
pub struct Form {
    mode: TestMode,
    responses: Vec<Option<ItemResponse>>,
}

/// Aggregate result of a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSummary {
    /// Mode of the form
    pub mode: TestMode,
    /// Summed scores of all items
    pub totals: ClassTotals,
    /// Items with a scored production
    pub scored_items: usize,
    /// Items produced correctly
    pub correct_items: usize,
    /// NR, NT and OP responses
    pub unscored_items: usize,
    /// Items with no response recorded
    pub pending_items: usize,
    /// Totals set against the norms
    pub diagnosis: Diagnosis,
}

impl Form {
    /// An empty form for `mode`.
    pub fn new(mode: TestMode) -> Self {
        Self {
            mode,
            responses: vec![None; mode.item_count()],
        }
    }

    /// Mode of the form.
    pub fn mode(&self) -> TestMode {
        self.mode
    }

    /// The administered items, in order.
    pub fn items(&self) -> &'static [WordSpec] {
        self.mode.items()
    }

    fn slot(&mut self, item: u8) -> Result<&mut Option<ItemResponse>> {
        let mode = self.mode;
        usize::from(item)
            .checked_sub(1)
            .and_then(|i| self.responses.get_mut(i))
            .ok_or(Error::ItemOutOfRange { item, mode })
    }

    /// Record (or replace) the response to `item`.
    pub fn record(&mut self, item: u8, response: ItemResponse) -> Result<()> {
        *self.slot(item)? = Some(response);
        Ok(())
    }

    /// Analyse a transcription of `item` and record it, scoring one point per
    /// detected code. An exact production is recorded as correct.
    pub fn record_transcription(&mut self, item: u8, transcription: &str) -> Result<WordAnalysis> {
        self.slot(item)?;
        let analysis = analyze_item(item, transcription).ok_or(Error::ItemOutOfRange {
            item,
            mode: self.mode,
        })?;
        let response = if analysis.is_correct() {
            ItemResponse::Correct
        } else {
            ItemResponse::Produced {
                transcription: transcription.to_string(),
                totals: ClassTotals::from(&analysis.processes),
            }
        };
        *self.slot(item)? = Some(response);
        Ok(analysis)
    }

    /// The response recorded for `item`, if any.
    pub fn response(&self, item: u8) -> Option<&ItemResponse> {
        usize::from(item)
            .checked_sub(1)
            .and_then(|i| self.responses.get(i))
            .and_then(Option::as_ref)
    }

    /// Sum of all scored responses.
    pub fn totals(&self) -> ClassTotals {
        self.responses
            .par_iter()
            .flatten()
            .map(ItemResponse::totals)
            .reduce(ClassTotals::default, |a, b| a + b)
    }

    /// Totals, response counts and diagnosis against `norms`.
    pub fn summary_with(&self, age: u32, norms: &NormTable) -> FormSummary {
        let totals = self.totals();
        let count = |pred: fn(&ItemResponse) -> bool| {
            self.responses.iter().flatten().filter(|r| pred(r)).count()
        };
        FormSummary {
            mode: self.mode,
            totals,
            scored_items: count(|r| matches!(r, ItemResponse::Produced { .. })),
            correct_items: count(|r| matches!(r, ItemResponse::Correct)),
            unscored_items: count(ItemResponse::is_unscored),
            pending_items: self.responses.iter().filter(|r| r.is_none()).count(),
            diagnosis: norms.diagnose(totals, age, self.mode),
        }
    }

    /// [`Form::summary_with`] against the built-in norms.
    pub fn summary(&self, age: u32) -> FormSummary {
        self.summary_with(age, NormTable::builtin())
    }
}
