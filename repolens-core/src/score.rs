//! Relevance scoring for filtered tree entries.
//!
//! Policy is data: name tables classify each survivor into a coarse tier,
//! and the numeric score is banded so that tier strictly dominates depth
//! and depth strictly dominates size. Ties resolve by lexical path order
//! downstream.

use crate::tree::TreeNode;
use serde::Serialize;

/// Manifest and dependency-declaration names (lock files are ignore-listed)
const MANIFEST_NAMES: &[&str] = &[
    "package.json",
    "pyproject.toml",
    "requirements.txt",
    "setup.py",
    "Cargo.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "Gemfile",
    "composer.json",
    "Dockerfile",
    "docker-compose.yml",
    "Makefile",
    "CMakeLists.txt",
    "tsconfig.json",
];

/// Conventional entrypoint source names
const ENTRYPOINT_NAMES: &[&str] = &[
    "main.py", "app.py", "index.js", "index.ts", "index.tsx", "app.js", "app.ts", "main.go",
    "main.rs", "lib.rs", "main.c", "main.cpp",
];

/// Manifests and entrypoints only count at or near the root
const SHALLOW_DEPTH: usize = 2;

/// Coarse relevance category, descending priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    RootDoc,
    Manifest,
    Entrypoint,
    OtherText,
}

impl Tier {
    fn base(&self) -> f64 {
        let band = match self {
            Self::RootDoc => 4.0,
            Self::Manifest => 3.0,
            Self::Entrypoint => 2.0,
            Self::OtherText => 1.0,
        };
        band * TIER_BAND
    }
}

/// A filtered tree entry with its tier and score; immutable after scoring
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub node: TreeNode,
    pub tier: Tier,
    pub score: f64,
}

const TIER_BAND: f64 = 10_000.0;
const DEPTH_STEP: f64 = 10.0;
const DEPTH_SATURATION: usize = 100;

pub fn classify(node: &TreeNode) -> Tier {
    let name = node.file_name();
    let depth = node.depth();

    if depth == 0 && name.to_lowercase().starts_with("readme") {
        return Tier::RootDoc;
    }
    if depth <= SHALLOW_DEPTH && MANIFEST_NAMES.contains(&name) {
        return Tier::Manifest;
    }
    if depth <= SHALLOW_DEPTH && ENTRYPOINT_NAMES.contains(&name) {
        return Tier::Entrypoint;
    }
    Tier::OtherText
}

/// Score every survivor of the ignore filter. Pure and stable: identical
/// input always yields identical scores. `default_size` stands in for
/// entries with no declared size.
pub fn score_candidates(nodes: &[TreeNode], default_size: u64) -> Vec<Candidate> {
    nodes
        .iter()
        .map(|node| {
            let tier = classify(node);
            let score = score_one(tier, node.depth(), node.size.unwrap_or(default_size));
            Candidate {
                node: node.clone(),
                tier,
                score,
            }
        })
        .collect()
}

fn score_one(tier: Tier, depth: usize, size: u64) -> f64 {
    let depth_term = (DEPTH_SATURATION - depth.min(DEPTH_SATURATION)) as f64 * DEPTH_STEP;
    // Bounded below DEPTH_STEP so size can never outweigh one depth level
    let size_term = DEPTH_STEP / (2.0 + (size as f64).ln_1p());
    tier.base() + depth_term + size_term
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(path: &str, size: u64) -> f64 {
        let node = TreeNode::file(path, Some(size));
        score_one(classify(&node), node.depth(), size)
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify(&TreeNode::file("README.md", None)), Tier::RootDoc);
        assert_eq!(classify(&TreeNode::file("readme.rst", None)), Tier::RootDoc);
        // a nested readme is not root documentation
        assert_eq!(
            classify(&TreeNode::file("docs/README.md", None)),
            Tier::OtherText
        );
        assert_eq!(
            classify(&TreeNode::file("package.json", None)),
            Tier::Manifest
        );
        assert_eq!(
            classify(&TreeNode::file("backend/Cargo.toml", None)),
            Tier::Manifest
        );
        assert_eq!(classify(&TreeNode::file("src/main.rs", None)), Tier::Entrypoint);
        assert_eq!(
            classify(&TreeNode::file("a/b/c/d/main.py", None)),
            Tier::OtherText
        );
        assert_eq!(
            classify(&TreeNode::file("src/util/helpers.py", None)),
            Tier::OtherText
        );
    }

    #[test]
    fn test_tier_dominates_depth() {
        // a deep manifest still outranks a root-level plain file
        assert!(score_of("a/b/package.json", 500_000) > score_of("notes.txt", 10));
        assert!(score_of("README.md", 1_000_000) > score_of("package.json", 10));
    }

    #[test]
    fn test_depth_dominates_size() {
        // shallow huge file beats deep tiny file within a tier
        assert!(score_of("big.txt", 10_000_000) > score_of("a/b/c/tiny.txt", 1));
    }

    #[test]
    fn test_size_breaks_equal_depth() {
        assert!(score_of("small.txt", 100) > score_of("large.txt", 1_000_000));
    }

    #[test]
    fn test_unknown_size_uses_estimate() {
        let nodes = vec![TreeNode::file("src/a.py", None)];
        let a = score_candidates(&nodes, 16_384);
        let b = score_candidates(&nodes, 16_384);
        assert_eq!(a[0].score, b[0].score);
        assert!(a[0].score > 0.0);
    }

    #[test]
    fn test_scoring_is_stable() {
        let nodes = vec![
            TreeNode::file("README.md", Some(3000)),
            TreeNode::file("src/main.rs", Some(800)),
            TreeNode::file("src/util/deep.rs", None),
        ];
        let first = score_candidates(&nodes, 1024);
        let second = score_candidates(&nodes, 1024);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.score, b.score);
            assert_eq!(a.tier, b.tier);
        }
    }
}
