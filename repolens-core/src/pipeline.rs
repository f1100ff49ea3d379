//! End-to-end content-selection pipeline.
//!
//! filter → score → select → render → assemble, for one tree listing.
//! Everything before the fetch stage is pure and synchronous; only malformed
//! upstream input (an empty candidate set) is an error.

use crate::assemble::{assemble, ContextBundle};
use crate::config::Config;
use crate::fetch::ContentFetcher;
use crate::ignore::IgnoreRuleSet;
use crate::render::render_tree;
use crate::score::score_candidates;
use crate::select::{select, Selection};
use crate::tree::TreeNode;
use crate::RepoLensError;
use std::sync::Arc;

/// Filter, score, and select without fetching anything.
///
/// Deterministic for a fixed listing, rule set, and budgets.
pub fn plan(
    nodes: &[TreeNode],
    rules: &IgnoreRuleSet,
    config: &Config,
) -> crate::Result<Selection> {
    let survivors = rules.filter(nodes);
    if survivors.is_empty() {
        return Err(RepoLensError::EmptyListing);
    }
    tracing::debug!(
        total = nodes.len(),
        kept = survivors.len(),
        dropped = nodes.len() - survivors.len(),
        "filtered tree listing"
    );

    let candidates = score_candidates(&survivors, config.selection.default_size_estimate);
    let selection = select(candidates, survivors, &config.selection);
    tracing::info!(
        selected = selection.total_files,
        bytes = selection.total_bytes,
        "selected files for context"
    );
    Ok(selection)
}

/// Run the whole pipeline and assemble the context bundle.
pub async fn run(
    nodes: &[TreeNode],
    rules: &IgnoreRuleSet,
    config: &Config,
    fetcher: Arc<dyn ContentFetcher>,
) -> crate::Result<ContextBundle> {
    let selection = plan(nodes, rules, config)?;
    let tree_text = render_tree(&selection.tree, config.render.max_tree_chars);

    let bundle = assemble(&selection, fetcher, tree_text, config).await;
    let fetched = bundle.files.iter().filter(|f| f.content.is_text()).count();
    tracing::info!(
        fetched,
        failed = bundle.files.len() - fetched,
        degraded = bundle.degraded,
        truncated = bundle.truncated,
        "assembled context bundle"
    );
    Ok(bundle)
}
