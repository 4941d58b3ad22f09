//! Leaf-to-root refresh of the best-source annotations.
//!
//! After a phrase is consumed, every leaf whose parent path can still reach
//! the phrase gets a chance to improve the annotations on its ancestor
//! chain. A node's pessimistic pair (`min_max` / `text_pos`) is recomputed
//! from the actual range maximum over the candidate's copy range; the
//! optimistic pair is reconciled against the best child so the search can
//! admit exhausted sources with the largest remaining runway.

use crate::factorize::Factorizer;
use crate::tree::{NodeId, NIL};

impl Factorizer {
    /// Walk backwards from the end of the phrase that covered
    /// `text_pos..text_pos + len` (literal included), refreshing the
    /// ancestors of each leaf that can still see the phrase. The running
    /// range maximum grows as the walk moves left; leaves whose parent path
    /// falls short of the phrase stop the walk entirely.
    pub(crate) fn propagate_annotation(&mut self, text_pos: u32, len: u32) {
        let mut range_max: u32 = 0;
        let final_pos = text_pos + len;
        let mut i = final_pos;
        while i > 0 {
            let cost = self.costs.get(i as usize);
            if cost > range_max {
                range_max = cost;
            }
            if self.tree.max_str_depth[i as usize] < text_pos {
                break;
            }
            self.change_annotation_from_leaf(i, final_pos, text_pos as i64 - i as i64, range_max);
            i -= 1;
        }
    }

    /// Refresh the ancestors of the leaf at `text_pos`, treating it as a
    /// candidate source whose copied range ends at `final_pos` and carries
    /// the range maximum `min_max_of_range`. Ancestors at depth `len` or
    /// less represent matches that end before the phrase and are left
    /// untouched; `len` is negative for positions inside the phrase itself.
    pub(crate) fn change_annotation_from_leaf(
        &mut self,
        text_pos: u32,
        final_pos: u32,
        len: i64,
        min_max_of_range: u32,
    ) {
        let leaf = self.tree.inverse_pointers[text_pos as usize];
        {
            let annot = &mut self.tree.nodes[leaf].annot;
            if annot.min_max.map_or(true, |m| min_max_of_range > m) {
                annot.min_max = Some(min_max_of_range);
                annot.optimistic_min_max = Some(min_max_of_range);
            }
        }

        let mut parent = self.tree.nodes[leaf].parent;
        while parent != NIL && (self.tree.nodes[parent].str_depth as i64) > len {
            let holder = self.best_child(parent);
            let holder_annot = self.tree.nodes[holder].annot;
            let depth = self.tree.nodes[parent].str_depth;

            if text_pos as u64 + depth as u64 - 1 <= final_pos as u64 {
                let hi = (text_pos + depth - 1) as usize;
                let cost = self.costs.capped_max(text_pos as usize, hi, self.cost_ceiling);
                let annot = self.tree.nodes[parent].annot;
                if annot.min_max == Some(self.cost_ceiling) {
                    if cost < self.cost_ceiling {
                        let node = &mut self.tree.nodes[parent].annot;
                        node.min_max = Some(cost);
                        node.text_pos = text_pos;
                    } else if self.dist[text_pos as usize] != -1
                        && self.dist[text_pos as usize] > self.dist[annot.text_pos as usize]
                    {
                        let node = &mut self.tree.nodes[parent].annot;
                        node.min_max = Some(cost);
                        node.text_pos = text_pos;
                    }
                } else if annot.min_max.map_or(true, |m| cost < m) {
                    let node = &mut self.tree.nodes[parent].annot;
                    node.min_max = Some(cost);
                    node.text_pos = text_pos;
                }
            }

            let annot = self.tree.nodes[parent].annot;
            let (new_min_max, new_text_pos) = if annot.optimistic_min_max.is_none() {
                (Some(min_max_of_range), text_pos)
            } else if annot.optimistic_min_max == Some(self.cost_ceiling) {
                if holder_annot.optimistic_min_max == Some(self.cost_ceiling) {
                    if self.dist[holder_annot.optimistic_text_pos as usize]
                        > self.dist[annot.optimistic_text_pos as usize]
                    {
                        (holder_annot.optimistic_min_max, holder_annot.optimistic_text_pos)
                    } else {
                        (annot.min_max, annot.text_pos)
                    }
                } else {
                    (holder_annot.optimistic_min_max, holder_annot.optimistic_text_pos)
                }
            } else if holder_annot.optimistic_min_max < annot.min_max {
                (holder_annot.optimistic_min_max, holder_annot.optimistic_text_pos)
            } else {
                (annot.min_max, annot.text_pos)
            };
            {
                let node = &mut self.tree.nodes[parent].annot;
                node.optimistic_min_max = new_min_max;
                node.optimistic_text_pos = new_text_pos;
            }

            parent = self.tree.nodes[parent].parent;
        }
    }

    /// The child of `node` with the smallest optimistic annotation; an
    /// unestablished annotation counts as smallest, and ties go to the
    /// candidate with the larger distance to the next exhausted position.
    pub(crate) fn best_child(&self, node: NodeId) -> NodeId {
        let nodes = &self.tree.nodes;
        let mut best = nodes[node].first_child;
        let mut current = best;
        while current != NIL {
            let b = nodes[best].annot;
            let c = nodes[current].annot;
            if b.optimistic_min_max > c.optimistic_min_max
                || (b.optimistic_min_max == c.optimistic_min_max
                    && self.dist[b.optimistic_text_pos as usize]
                        < self.dist[c.optimistic_text_pos as usize])
            {
                best = current;
            }
            current = nodes[current].right_sibling;
        }
        best
    }
}
