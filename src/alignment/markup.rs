//! Marked display of an aligned target/produced pair.
//!
//! The target side is rendered as equal, deleted and changed runs; the
//! produced side as equal, inserted and changed runs. Concatenating the
//! segments of either side gives back that side's string.

use std::fmt;

use serde::Serialize;

use super::{char_opcodes, OpTag};

/// Role of a run of symbols in the marked display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Present on both sides
    Equal,
    /// Target symbols missing from the production
    Deleted,
    /// Production symbols absent from the target
    Inserted,
    /// Symbols replaced on this side
    Changed,
}

/// A run of symbols with its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkedSegment {
    /// Role of the run
    pub kind: SegmentKind,
    /// Symbols of the run
    pub text: String,
}

/// Both sides of a marked alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkedPair {
    /// Segments of the target word
    pub target: Vec<MarkedSegment>,
    /// Segments of the production
    pub produced: Vec<MarkedSegment>,
}

fn push(side: &mut Vec<MarkedSegment>, kind: SegmentKind, text: String) {
    if !text.is_empty() {
        side.push(MarkedSegment { kind, text });
    }
}

/// Build the marked display segments of `target` against `produced`.
pub fn mark_pair(target: &str, produced: &str) -> MarkedPair {
    let a: Vec<char> = target.chars().collect();
    let b: Vec<char> = produced.chars().collect();
    let mut pair = MarkedPair::default();

    for op in char_opcodes(target, produced) {
        let left: String = a[op.a.clone()].iter().collect();
        let right: String = b[op.b.clone()].iter().collect();
        match op.tag {
            OpTag::Equal => {
                push(&mut pair.target, SegmentKind::Equal, left);
                push(&mut pair.produced, SegmentKind::Equal, right);
            }
            OpTag::Delete => push(&mut pair.target, SegmentKind::Deleted, left),
            OpTag::Insert => push(&mut pair.produced, SegmentKind::Inserted, right),
            OpTag::Replace => {
                push(&mut pair.target, SegmentKind::Changed, left);
                push(&mut pair.produced, SegmentKind::Changed, right);
            }
        }
    }
    pair
}

impl MarkedSegment {
    fn plain(&self) -> String {
        match self.kind {
            SegmentKind::Equal => self.text.clone(),
            SegmentKind::Deleted => format!("[-{}]", self.text),
            SegmentKind::Inserted => format!("[+{}]", self.text),
            SegmentKind::Changed => format!("[{}]", self.text),
        }
    }
}

impl MarkedPair {
    /// Plain text of one side, with no markers.
    pub fn target_text(&self) -> String {
        self.target.iter().map(|s| s.text.as_str()).collect()
    }

    /// Plain text of the produced side, with no markers.
    pub fn produced_text(&self) -> String {
        self.produced.iter().map(|s| s.text.as_str()).collect()
    }
}

impl fmt::Display for MarkedPair {
    /// Bracketed rendering, e.g. `t[-r]en / ten`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target: String = self.target.iter().map(MarkedSegment::plain).collect();
        let produced: String = self.produced.iter().map(MarkedSegment::plain).collect();
        write!(f, "{} / {}", target, produced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deletion_marked_on_target() {
        let pair = mark_pair("tren", "ten");
        assert_eq!(pair.to_string(), "t[-r]en / ten");
        assert!(pair.produced.iter().all(|s| s.kind == SegmentKind::Equal));
    }

    #[test]
    fn test_insertion_marked_on_produced() {
        let pair = mark_pair("pato", "patro");
        assert_eq!(pair.to_string(), "pato / pat[+r]o");
    }

    #[test]
    fn test_change_marked_on_both() {
        let pair = mark_pair("xugo", "pugo");
        assert_eq!(pair.to_string(), "[x]ugo / [p]ugo");
    }

    #[test]
    fn test_sides_reconstruct() {
        let pair = mark_pair("guitaRa", "kitara");
        assert_eq!(pair.target_text(), "guitaRa");
        assert_eq!(pair.produced_text(), "kitara");
    }

    #[test]
    fn test_empty_produced() {
        let pair = mark_pair("sol", "");
        assert_eq!(pair.to_string(), "[-sol] / ");
    }
}
