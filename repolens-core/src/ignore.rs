//! Noise filtering for tree listings.
//!
//! Patterns follow conventional ignore-file behavior: a trailing slash
//! excludes a directory and everything beneath it at any depth, a bare
//! name or `*`-pattern matches at any depth, and matching is evaluated
//! against the full relative path, case-sensitively.

use crate::config::IgnoreConfig;
use crate::error::RepoLensError;
use crate::tree::{NodeKind, TreeNode};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Noise category an ignore pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    BinaryMedia,
    BuildArtifacts,
    LockFiles,
    Dependencies,
    VcsMeta,
}

impl RuleCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BinaryMedia => "binary-media",
            Self::BuildArtifacts => "build-artifacts",
            Self::LockFiles => "lock-files",
            Self::Dependencies => "dependencies",
            Self::VcsMeta => "vcs-meta",
        }
    }
}

/// Compiled, category-partitioned ignore rules.
///
/// Built once at process start from config and shared read-only across
/// requests; only the startup path constructs it.
pub struct IgnoreRuleSet {
    sets: Vec<(RuleCategory, GlobSet)>,
}

impl IgnoreRuleSet {
    pub fn from_config(config: &IgnoreConfig) -> crate::Result<Self> {
        let sets = vec![
            (RuleCategory::BinaryMedia, compile(&config.binary_media)?),
            (
                RuleCategory::BuildArtifacts,
                compile(&config.build_artifacts)?,
            ),
            (RuleCategory::LockFiles, compile(&config.lock_files)?),
            (RuleCategory::Dependencies, compile(&config.dependencies)?),
            (RuleCategory::VcsMeta, compile(&config.vcs_meta)?),
        ];
        Ok(Self { sets })
    }

    /// First category whose rules match the path, in config order
    pub fn matched(&self, path: &str) -> Option<RuleCategory> {
        self.sets
            .iter()
            .find(|(_, set)| set.is_match(path))
            .map(|(category, _)| *category)
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.matched(path).is_some()
    }

    /// Drop noise paths and structural directory nodes, preserving input order.
    ///
    /// Pure function of its inputs; no content is inspected.
    pub fn filter(&self, nodes: &[TreeNode]) -> Vec<TreeNode> {
        nodes
            .iter()
            .filter(|node| node.kind == NodeKind::File && !self.is_ignored(&node.path))
            .cloned()
            .collect()
    }
}

/// Translate gitignore-style patterns into full-path globs.
fn compile(patterns: &[String]) -> crate::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        for glob_pattern in translate(pattern) {
            let glob = Glob::new(&glob_pattern)
                .map_err(|e| RepoLensError::GlobPattern(format!("{}: {}", pattern, e)))?;
            builder.add(glob);
        }
    }
    builder
        .build()
        .map_err(|e| RepoLensError::GlobPattern(e.to_string()))
}

fn translate(pattern: &str) -> Vec<String> {
    if let Some(stem) = pattern.strip_suffix('/') {
        // Directory-only: everything beneath it, at any depth
        vec![format!("{}/**", stem), format!("**/{}/**", stem)]
    } else if pattern.contains('/') {
        vec![pattern.to_string()]
    } else {
        // Bare names and extension patterns match at any depth
        vec![format!("**/{}", pattern)]
    }
}
