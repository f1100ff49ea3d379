//! Repolens Core - repository content selection
//!
//! This library decides which files of a repository are worth reading:
//! it filters a tree listing down to candidates, scores them by likely
//! informational value, selects a budget-bounded subset, and assembles a
//! context bundle (tree rendering plus fetched contents) for downstream
//! summarization.

pub mod assemble;
pub mod config;
pub mod error;
pub mod fetch;
pub mod ignore;
pub mod pipeline;
pub mod render;
pub mod score;
pub mod select;
pub mod tree;

pub use assemble::{BundleFile, ContextBundle, FileContent};
pub use config::Config;
pub use error::RepoLensError;
pub use fetch::{ContentFetcher, FetchFailure};
pub use ignore::{IgnoreRuleSet, RuleCategory};
pub use score::{Candidate, Tier};
pub use select::Selection;
pub use tree::{NodeKind, TreeNode};

/// Result type alias for repolens operations
pub type Result<T> = std::result::Result<T, RepoLensError>;
