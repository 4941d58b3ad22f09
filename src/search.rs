//! Substring search over the tree.
//!
//! Two walks share the topology. The classical walk ignores annotations and
//! reports the longest prefix of a pattern present anywhere in the text; it
//! backs [`SuffixTree::find_substring`] and the self-test. The cost-aware
//! walk reads the per-node source annotations and stops as soon as no
//! admissible source remains, which is what the factorizer uses to pick the
//! next phrase.

use crate::error::{Error, Result};
use crate::factorize::Factorizer;
use crate::tree::{SuffixTree, NIL};

/// Location of a classical substring match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occurrence {
    /// 0-based position in the input where the matched prefix starts.
    pub position: usize,
    /// Number of leading pattern bytes that were found.
    pub len: usize,
}

/// A copy source selected by the cost-aware search: a 1-based text position
/// and the number of bytes admissibly copyable from it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SourceMatch {
    pub(crate) pos: u32,
    pub(crate) length: u32,
}

impl SuffixTree {
    /// Find the longest prefix of `pattern` that occurs in the indexed
    /// text, ignoring annotations. Returns `None` when not even the first
    /// byte occurs (or the pattern is empty).
    pub fn find_substring(&self, pattern: &[u8]) -> Option<Occurrence> {
        let first = *pattern.first()?;
        let mut node = self.find_son(self.root, first);
        let mut j = 0usize;
        let mut last = node;
        while node != NIL {
            last = node;
            let mut k = self.nodes[node].edge_start;
            let end = self.label_end(node);
            while j < pattern.len() && k <= end && self.byte(k) == pattern[j] {
                j += 1;
                k += 1;
            }
            if j == pattern.len() {
                break;
            }
            if k > end {
                node = self.find_son(node, pattern[j]);
            } else {
                break;
            }
        }
        if j == 0 {
            return None;
        }
        Some(Occurrence {
            position: self.nodes[last].path_position as usize - 1,
            len: j,
        })
    }

    /// Search every substring of the indexed text and verify it is found at
    /// full length. Quadratically many lookups; intended for short inputs
    /// and diagnostics.
    pub fn self_test(&self) -> bool {
        for hi in 1..self.length {
            for lo in 1..=hi {
                let pattern = &self.text[lo as usize..=hi as usize];
                match self.find_substring(pattern) {
                    Some(occurrence) if occurrence.len == pattern.len() => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Factorizer {
    /// Longest admissible match for the text starting at 1-based position
    /// `from`, walking the annotated tree from the root.
    ///
    /// Descent stops at the first node with no established source
    /// (`current` is then final) or whose whole subtree is exhausted, in
    /// which case the distance-to-exhausted of its candidate decides whether
    /// that candidate still improves the match.
    pub(crate) fn find_match(&self, from: u32) -> Result<SourceMatch> {
        let tree = &self.tree;
        let remaining = tree.length - from + 1;
        let mut current = SourceMatch { pos: 0, length: 0 };
        let mut node = tree.find_son(tree.root, tree.byte(from));
        let mut j: u32 = 0;
        while node != NIL {
            let annot = tree.nodes[node].annot;
            match annot.optimistic_min_max {
                None => return Ok(current),
                Some(min_max) if min_max == self.cost_ceiling => {
                    let reach = self.dist[annot.optimistic_text_pos as usize];
                    if reach > current.length as i64 {
                        current.pos = annot.optimistic_text_pos;
                        current.length = reach as u32;
                    }
                    return Ok(current);
                }
                Some(_) => {}
            }

            let mut k = tree.nodes[node].edge_start;
            let end = tree.label_end(node);
            while j < remaining && k <= end && tree.byte(k) == tree.byte(from + j) {
                j += 1;
                k += 1;
            }

            current.length = j;
            if annot.optimistic_text_pos == 0 {
                return Err(Error::NullSource(from));
            }
            current.pos = annot.optimistic_text_pos;

            if j == remaining {
                return Ok(current);
            } else if k > end {
                node = tree.find_son(node, tree.byte(from + j));
            } else {
                return Ok(current);
            }
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &[u8]) -> SuffixTree {
        SuffixTree::build(text).expect("buildable input")
    }

    #[test]
    fn finds_full_substrings() {
        let tree = build(b"banana");
        let hit = tree.find_substring(b"ana").expect("present");
        assert_eq!(hit.len, 3);
        assert!(hit.position == 1 || hit.position == 3);

        let hit = tree.find_substring(b"banana").expect("present");
        assert_eq!(hit.len, 6);
        assert_eq!(hit.position, 0);
    }

    #[test]
    fn reports_partial_prefix_on_mismatch() {
        let tree = build(b"banana");
        let hit = tree.find_substring(b"band").expect("prefix present");
        assert_eq!(hit.len, 3);
        assert_eq!(hit.position, 0);
    }

    #[test]
    fn missing_first_byte_yields_none() {
        let tree = build(b"banana");
        assert!(tree.find_substring(b"x").is_none());
        assert!(tree.find_substring(b"").is_none());
    }

    #[test]
    fn occurrence_positions_are_faithful() {
        let text = b"abracadabra";
        let tree = build(text);
        for lo in 0..text.len() {
            for hi in lo..text.len() {
                let pattern = &text[lo..=hi];
                let hit = tree.find_substring(pattern).expect("every substring occurs");
                assert_eq!(hit.len, pattern.len());
                assert_eq!(&text[hit.position..hit.position + hit.len], pattern);
            }
        }
    }

    #[test]
    fn self_test_passes_on_short_inputs() {
        for text in [&b"x"[..], b"aa", b"abab", b"mississippi", b"abcabcabc", b"banana"] {
            assert!(build(text).self_test(), "text {:?}", text);
        }
    }
}
