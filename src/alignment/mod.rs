//! Minimal-edit alignment between a target and a produced transcription.
//!
//! The alignment is computed the Ratcliff/Obershelp way: find the longest
//! common run, recurse on the pieces left and right of it, then turn the
//! matching blocks into an ordered opcode list. Ties are broken towards the
//! earliest run in the target, then the earliest in the produced string, so
//! the result is deterministic.
//!
//! The opcodes cover both sequences completely and in order:
//!
//! ```
//! use teprosif::alignment::{opcodes, OpTag};
//!
//! let a: Vec<char> = "tren".chars().collect();
//! let b: Vec<char> = "ten".chars().collect();
//! let ops = opcodes(&a, &b);
//! assert_eq!(ops[0].tag, OpTag::Equal);
//! assert_eq!(ops[1].tag, OpTag::Delete);
//! assert_eq!(&a[ops[1].a.clone()], &['r']);
//! ```

pub mod markup;

use std::hash::Hash;
use std::ops::Range;

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

pub use markup::{mark_pair, MarkedPair, MarkedSegment, SegmentKind};

/// Kind of an alignment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    /// Both ranges hold the same elements
    Equal,
    /// Target elements replaced by different produced elements
    Replace,
    /// Target elements with no produced counterpart
    Delete,
    /// Produced elements with no target counterpart
    Insert,
}

/// One alignment operation over index ranges of both sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opcode {
    /// What happened
    pub tag: OpTag,
    /// Range in the target sequence
    pub a: Range<usize>,
    /// Range in the produced sequence
    pub b: Range<usize>,
}

/// A run `a[a_start..a_start + len] == b[b_start..b_start + len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchBlock {
    /// Start in the target
    pub a_start: usize,
    /// Start in the produced sequence
    pub b_start: usize,
    /// Length of the run
    pub len: usize,
}

/// Longest-match-first sequence aligner.
///
/// Holds an index from each element of `b` to the positions where it occurs,
/// so repeated longest-match queries do not rescan `b`.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: FxHashMap<&'a T, SmallVec<[usize; 4]>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    /// Build a matcher for the pair `(a, b)`.
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: FxHashMap<&'a T, SmallVec<[usize; 4]>> = FxHashMap::default();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Find the longest matching run inside `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns a block of length 0 at `(alo, blo)` when nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchBlock {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);
        // j2len[j] = length of the longest run ending at a[i - 1], b[j]
        let mut j2len: FxHashMap<usize, usize> = FxHashMap::default();

        for i in alo..ahi {
            let mut next: FxHashMap<usize, usize> = FxHashMap::default();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next;
        }

        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        MatchBlock {
            a_start: besti,
            b_start: bestj,
            len: bestsize,
        }
    }

    /// All matching blocks in order, adjacent blocks merged, terminated by a
    /// zero-length sentinel at `(a.len(), b.len())`.
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.len > 0 {
                if alo < m.a_start && blo < m.b_start {
                    queue.push((alo, m.a_start, blo, m.b_start));
                }
                if m.a_start + m.len < ahi && m.b_start + m.len < bhi {
                    queue.push((m.a_start + m.len, ahi, m.b_start + m.len, bhi));
                }
                blocks.push(m);
            }
        }
        blocks.sort();

        let mut merged: Vec<MatchBlock> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.len == block.a_start
                        && last.b_start + last.len == block.b_start =>
                {
                    last.len += block.len;
                }
                _ => merged.push(block),
            }
        }
        merged.push(MatchBlock {
            a_start: la,
            b_start: lb,
            len: 0,
        });
        merged
    }

    /// The opcode list turning `a` into `b`.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut ops = Vec::new();
        let (mut i, mut j) = (0, 0);

        for block in self.matching_blocks() {
            let tag = match (i < block.a_start, j < block.b_start) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                ops.push(Opcode {
                    tag,
                    a: i..block.a_start,
                    b: j..block.b_start,
                });
            }
            i = block.a_start + block.len;
            j = block.b_start + block.len;
            if block.len > 0 {
                ops.push(Opcode {
                    tag: OpTag::Equal,
                    a: block.a_start..i,
                    b: block.b_start..j,
                });
            }
        }
        ops
    }
}

/// Convenience wrapper: opcodes between two sequences.
pub fn opcodes<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<Opcode> {
    SequenceMatcher::new(a, b).opcodes()
}

/// Opcodes between two strings, by `char`.
pub fn char_opcodes(a: &str, b: &str) -> Vec<Opcode> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    opcodes(&a, &b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn tags(a: &str, b: &str) -> Vec<(OpTag, Range<usize>, Range<usize>)> {
        char_opcodes(a, b)
            .into_iter()
            .map(|op| (op.tag, op.a, op.b))
            .collect()
    }

    #[test]
    fn test_identical() {
        assert_eq!(tags("auto", "auto"), vec![(OpTag::Equal, 0..4, 0..4)]);
    }

    #[test]
    fn test_empty_sides() {
        assert!(tags("", "").is_empty());
        assert_eq!(tags("ab", ""), vec![(OpTag::Delete, 0..2, 0..0)]);
        assert_eq!(tags("", "ab"), vec![(OpTag::Insert, 0..0, 0..2)]);
    }

    #[test]
    fn test_deletion() {
        assert_eq!(
            tags("tren", "ten"),
            vec![
                (OpTag::Equal, 0..1, 0..1),
                (OpTag::Delete, 1..2, 1..1),
                (OpTag::Equal, 2..4, 1..3),
            ]
        );
    }

    #[test]
    fn test_replace_runs() {
        assert_eq!(
            tags("guitaRa", "kitara"),
            vec![
                (OpTag::Replace, 0..2, 0..1),
                (OpTag::Equal, 2..5, 1..4),
                (OpTag::Replace, 5..6, 4..5),
                (OpTag::Equal, 6..7, 5..6),
            ]
        );
    }

    #[test]
    fn test_longest_match_prefers_earliest() {
        let a = chars("abab");
        let b = chars("ab");
        let m = SequenceMatcher::new(&a, &b).find_longest_match(0, 4, 0, 2);
        assert_eq!(
            m,
            MatchBlock {
                a_start: 0,
                b_start: 0,
                len: 2
            }
        );
    }

    #[test]
    fn test_matching_blocks_sentinel() {
        let a = chars("xugo");
        let b = chars("pugo");
        let blocks = SequenceMatcher::new(&a, &b).matching_blocks();
        assert_eq!(
            blocks.last(),
            Some(&MatchBlock {
                a_start: 4,
                b_start: 4,
                len: 0
            })
        );
        assert_eq!(blocks[0].len, 3);
    }

    #[test]
    fn test_multibyte_symbols() {
        assert_eq!(
            tags("planĉa", "plansa"),
            vec![
                (OpTag::Equal, 0..4, 0..4),
                (OpTag::Replace, 4..5, 4..5),
                (OpTag::Equal, 5..6, 5..6),
            ]
        );
    }
}
