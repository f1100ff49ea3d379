//! Greedy budget-bounded selection.
//!
//! Deliberately greedy-by-score rather than optimal subset-sum: the scorer
//! already front-loads the highest-value files, and determinism matters more
//! than byte-optimality.

use crate::config::SelectionConfig;
use crate::score::Candidate;
use crate::tree::TreeNode;
use serde::Serialize;

/// Outcome of selection: chosen candidates in selection order, the full
/// filtered tree for rendering, and running totals.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub chosen: Vec<Candidate>,
    pub tree: Vec<TreeNode>,
    pub total_files: usize,
    pub total_bytes: u64,
}

/// Pick the top-scoring candidates under the count and byte budgets.
///
/// Candidates are ranked by score descending with lexical path tie-break,
/// then admitted greedily. A candidate that does not fit the remaining byte
/// budget is skipped without halting the scan, so a single oversized file
/// never exhausts the budget.
pub fn select(candidates: Vec<Candidate>, tree: Vec<TreeNode>, limits: &SelectionConfig) -> Selection {
    let mut ranked = candidates;
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.node.path.cmp(&b.node.path))
    });

    let mut chosen = Vec::new();
    let mut total_bytes = 0u64;

    for candidate in ranked {
        if chosen.len() >= limits.max_files {
            break;
        }
        // Unknown size counts as the estimate, never zero
        let size = candidate.node.size.unwrap_or(limits.default_size_estimate);
        if total_bytes + size > limits.max_bytes {
            continue;
        }
        total_bytes += size;
        chosen.push(candidate);
    }

    Selection {
        total_files: chosen.len(),
        total_bytes,
        chosen,
        tree,
    }
}
