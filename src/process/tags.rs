//! Ordered, duplicate-free collection of process codes.

use serde::Serialize;
use smallvec::SmallVec;

use super::code::{ProcessClass, ProcessCode};

/// Insertion-ordered set of process codes.
///
/// Detectors push codes as they find them; a code already present is
/// ignored, so the first occurrence fixes its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    codes: SmallVec<[ProcessCode; 8]>,
}

impl TagSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `code` unless present. Returns true if it was added.
    pub fn push(&mut self, code: ProcessCode) -> bool {
        if self.contains(code) {
            return false;
        }
        self.codes.push(code);
        true
    }

    /// Push `code` `n` times; after the first, the rest are no-ops.
    pub fn push_n(&mut self, code: ProcessCode, n: usize) {
        if n > 0 {
            self.push(code);
        }
    }

    /// Returns true if `code` was pushed.
    #[inline]
    pub fn contains(&self, code: ProcessCode) -> bool {
        self.codes.contains(&code)
    }

    /// Number of distinct codes.
    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if nothing was pushed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Freeze into a result, keeping the order.
    pub fn into_result(self) -> ProcessResult {
        ProcessResult {
            codes: self.codes.into_vec(),
        }
    }
}

impl Extend<ProcessCode> for TagSet {
    fn extend<I: IntoIterator<Item = ProcessCode>>(&mut self, iter: I) {
        for code in iter {
            self.push(code);
        }
    }
}

impl FromIterator<ProcessCode> for TagSet {
    fn from_iter<I: IntoIterator<Item = ProcessCode>>(iter: I) -> Self {
        let mut set = TagSet::new();
        set.extend(iter);
        set
    }
}

/// The deduplicated process codes detected for one word pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProcessResult {
    codes: Vec<ProcessCode>,
}

impl ProcessResult {
    /// Codes in detection order.
    pub fn codes(&self) -> &[ProcessCode] {
        &self.codes
    }

    /// Returns true if `code` was detected.
    pub fn contains(&self, code: ProcessCode) -> bool {
        self.codes.contains(&code)
    }

    /// Number of detected codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if no process was detected.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over the codes in detection order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProcessCode> {
        self.codes.iter()
    }

    /// Number of codes of the given class.
    pub fn count_class(&self, class: ProcessClass) -> usize {
        self.codes.iter().filter(|c| c.class() == class).count()
    }

    /// Dotted tags in order, e.g. `["E.1", "S.9"]`.
    pub fn tags(&self) -> Vec<String> {
        self.codes.iter().map(|c| c.to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a ProcessResult {
    type Item = &'a ProcessCode;
    type IntoIter = std::slice::Iter<'a, ProcessCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

impl FromIterator<ProcessCode> for ProcessResult {
    fn from_iter<I: IntoIterator<Item = ProcessCode>>(iter: I) -> Self {
        iter.into_iter().collect::<TagSet>().into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProcessCode::*;

    #[test]
    fn test_first_occurrence_wins() {
        let mut set = TagSet::new();
        assert!(set.push(Devoicing));
        assert!(set.push(ClusterReduction));
        assert!(!set.push(Devoicing));
        set.push_n(CodaDeletion, 3);
        set.push_n(Addition, 0);
        let result = set.into_result();
        assert_eq!(result.codes(), &[Devoicing, ClusterReduction, CodaDeletion]);
    }

    #[test]
    fn test_class_counts() {
        let result: ProcessResult = [Coalescence, Devoicing, LiquidForLiquid, Devoicing]
            .into_iter()
            .collect();
        assert_eq!(result.len(), 3);
        assert_eq!(result.count_class(ProcessClass::Structure), 1);
        assert_eq!(result.count_class(ProcessClass::Assimilation), 0);
        assert_eq!(result.count_class(ProcessClass::Substitution), 2);
        assert_eq!(result.tags(), vec!["E.4", "S.9", "S.11"]);
    }

    #[test]
    fn test_serializes_as_tag_list() {
        let result: ProcessResult = [Metathesis, Aspiration].into_iter().collect();
        assert_eq!(serde_json::to_string(&result).unwrap(), r#"["E.8","S.1"]"#);
    }
}
