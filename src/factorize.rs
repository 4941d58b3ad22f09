//! The greedy phrase loop.
//!
//! A [`Factorizer`] owns the annotated tree, the cost array and the
//! distance-to-exhausted table, and yields one [`Phrase`] per iteration:
//! search for the longest admissible match, charge the copied source
//! positions, zero the literal position and re-annotate the ancestors of
//! every leaf the phrase touched.

use std::fmt;

use crate::error::{Error, Result};
use crate::segment::SegmentTree;
use crate::tree::SuffixTree;

/// One phrase of the factorization.
///
/// A phrase says: copy `len` bytes starting at the (1-based) text position
/// `source`, then append `literal`. A bare literal has `source == 0` and
/// `len == 0`. The final phrase's literal may be 0, the end-of-string
/// sentinel, when the copied range runs to the end of the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Phrase {
    /// 1-based source position of the copied range; 0 for a bare literal.
    pub source: u32,
    /// Number of copied bytes.
    pub len: u32,
    /// The byte following the copied range.
    pub literal: u8,
}

impl Phrase {
    /// 0-based source position, or `None` for a bare literal phrase.
    pub fn source_index(&self) -> Option<usize> {
        if self.source == 0 {
            None
        } else {
            Some(self.source as usize - 1)
        }
    }
}

impl fmt::Display for Phrase {
    /// Renders as `(source,len,literal)` with a 0-based source, `-1` when
    /// the phrase is a bare literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.source as i64 - 1, self.len, self.literal)
    }
}

/// A completed factorization together with the parameters that produced it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Factorization {
    /// The emitted phrases, in text order.
    pub phrases: Vec<Phrase>,
    /// The cost ceiling the factorization was computed under.
    pub cost_ceiling: u32,
    /// Length of the factorized input in bytes.
    pub input_len: usize,
}

impl Factorization {
    /// Number of phrases, usually written `z`.
    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Reconstruct the input from the phrases.
    ///
    /// Copies honor the run-length semantics of self-overlapping sources:
    /// the source cursor wraps back to the start of the source range when
    /// it reaches the phrase's own start position.
    pub fn decode(&self) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::with_capacity(self.input_len);
        for phrase in &self.phrases {
            if phrase.len > 0 {
                let source = phrase.source as usize - 1;
                let start = out.len();
                let mut k = 0;
                for _ in 0..phrase.len {
                    out.push(out[source + k]);
                    k += 1;
                    if source + k == start {
                        k = 0;
                    }
                }
            }
            if phrase.literal != 0 {
                out.push(phrase.literal);
            }
        }
        out
    }
}

/// Greedy bounded-cost factorizer over an annotated suffix tree.
///
/// Iterating yields `Result<Phrase, Error>`; an `Err` means an internal
/// invariant was violated and the iteration stops. The tree is consumed
/// because the factorization mutates its annotations.
///
/// # Example
///
/// ```
/// use batlz::{Factorizer, SuffixTree};
///
/// let tree = SuffixTree::build(b"abcabcabc").unwrap();
/// let phrases: Result<Vec<_>, _> = Factorizer::new(tree, 10).unwrap().collect();
/// let phrases = phrases.unwrap();
/// assert_eq!(phrases.len(), 4);
/// ```
#[derive(Debug)]
pub struct Factorizer {
    pub(crate) tree: SuffixTree,
    pub(crate) costs: SegmentTree,
    /// Distance to the next exhausted position, `-1` where unclassified.
    pub(crate) dist: Vec<i64>,
    pub(crate) cost_ceiling: u32,
    text_pos: u32,
    prev_exhausted: u32,
    emitted: u64,
    failed: bool,
}

impl Factorizer {
    /// Wrap `tree` for factorization under `cost_ceiling`.
    ///
    /// Every cost starts at the "infinity" sentinel `n + 1`; the distance
    /// table starts unclassified.
    pub fn new(tree: SuffixTree, cost_ceiling: u32) -> Result<Self> {
        if cost_ceiling == 0 {
            return Err(Error::ZeroCostCeiling);
        }
        let length = tree.length as usize;
        let costs = SegmentTree::new(length, tree.length);
        let dist = vec![-1; length + 1];
        Ok(Factorizer {
            tree,
            costs,
            dist,
            cost_ceiling,
            text_pos: 1,
            prev_exhausted: 0,
            emitted: 0,
            failed: false,
        })
    }

    /// The configured cost ceiling.
    pub fn cost_ceiling(&self) -> u32 {
        self.cost_ceiling
    }

    /// Bytes of input consumed so far.
    pub fn bytes_consumed(&self) -> usize {
        self.text_pos as usize - 1
    }

    /// Phrases emitted so far.
    pub fn phrases_emitted(&self) -> u64 {
        self.emitted
    }

    /// The tree being factorized.
    pub fn tree(&self) -> &SuffixTree {
        &self.tree
    }

    fn step(&mut self) -> Result<Phrase> {
        let text_pos = self.text_pos;
        let matched = self.find_match(text_pos)?;
        if text_pos + matched.length > self.tree.length {
            return Err(Error::MatchPastEnd {
                position: text_pos,
                length: matched.length,
            });
        }

        let mut k: u32 = 0;
        for i in 0..matched.length {
            let new_cost = self.costs.get((matched.pos + k) as usize) + 1;
            self.costs.update((text_pos + i) as usize, new_cost);
            if new_cost == self.cost_ceiling {
                // This position just exhausted: classify the gap behind it.
                self.dist[(text_pos + i) as usize] = 0;
                let mut p = text_pos + i - 1;
                while p > self.prev_exhausted {
                    self.dist[p as usize] = self.dist[p as usize + 1] + 1;
                    p -= 1;
                }
                self.prev_exhausted = text_pos + i;
            }
            if new_cost > self.cost_ceiling {
                return Err(Error::CostOverrun {
                    position: text_pos + i,
                    cost: new_cost,
                    ceiling: self.cost_ceiling,
                });
            }
            k += 1;
            if matched.pos + k == text_pos {
                // Self-overlapping copy: the source cursor wraps.
                k = 0;
            }
        }

        self.costs.update((text_pos + matched.length) as usize, 0);
        self.propagate_annotation(text_pos, matched.length);

        self.text_pos = text_pos + matched.length + 1;
        self.emitted += 1;
        Ok(Phrase {
            source: matched.pos,
            len: matched.length,
            literal: self.tree.byte(text_pos + matched.length),
        })
    }
}

impl Iterator for Factorizer {
    type Item = Result<Phrase>;

    fn next(&mut self) -> Option<Self::Item> {
        // The sentinel position never starts a phrase.
        if self.failed || self.text_pos >= self.tree.length {
            return None;
        }
        match self.step() {
            Ok(phrase) => Some(Ok(phrase)),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Build the tree over `input` and run the factorization to completion.
pub fn factorize(input: &[u8], cost_ceiling: u32) -> Result<Factorization> {
    let tree = SuffixTree::build(input)?;
    let mut factorizer = Factorizer::new(tree, cost_ceiling)?;
    let mut phrases = Vec::new();
    for phrase in &mut factorizer {
        phrases.push(phrase?);
    }
    Ok(Factorization {
        phrases,
        cost_ceiling,
        input_len: input.len(),
    })
}
