//! Bounded text rendering of the filtered tree.
//!
//! Produces a deterministic indentation-based flattening of the filtered
//! listing. When the output would exceed the character bound, deeper
//! subtrees are collapsed behind an explicit entry-count marker; as a last
//! resort the renderer degrades to a truncated flat path listing. It never
//! fails.

use crate::tree::{NodeKind, TreeNode};

pub fn render_tree(nodes: &[TreeNode], max_chars: usize) -> String {
    let mut paths: Vec<&str> = nodes
        .iter()
        .filter(|n| n.kind == NodeKind::File)
        .map(|n| n.path.as_str())
        .collect();
    paths.sort_unstable();
    paths.dedup();

    if paths.is_empty() {
        return String::new();
    }

    let max_depth = paths
        .iter()
        .map(|p| p.matches('/').count())
        .max()
        .unwrap_or(0);

    // Deepest rendering that fits wins; each step collapses one more level.
    for cutoff in (0..=max_depth + 1).rev() {
        let out = render_nested(&paths, cutoff);
        if out.chars().count() <= max_chars {
            return out;
        }
    }

    flat_listing(&paths, max_chars)
}

/// Indented rendering with subtrees below `cutoff` collapsed to a marker.
fn render_nested(paths: &[&str], cutoff: usize) -> String {
    let mut out = String::new();
    let mut open_dirs: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < paths.len() {
        let comps: Vec<&str> = paths[i].split('/').collect();
        let dirs = &comps[..comps.len() - 1];
        let shared = open_dirs
            .iter()
            .zip(dirs.iter())
            .take_while(|(a, b)| a == b)
            .count();
        open_dirs.truncate(shared);

        if dirs.len() <= cutoff {
            for (depth, dir) in dirs.iter().enumerate().skip(shared) {
                push_line(&mut out, depth, &format!("{}/", dir));
                open_dirs.push(dir);
            }
            push_line(&mut out, dirs.len(), comps[comps.len() - 1]);
            i += 1;
        } else {
            // Everything under the directory at the cutoff level is one group
            for (depth, dir) in dirs.iter().enumerate().take(cutoff).skip(shared) {
                push_line(&mut out, depth, &format!("{}/", dir));
                open_dirs.push(dir);
            }
            let prefix = format!("{}/", comps[..=cutoff].join("/"));
            let start = i;
            while i < paths.len() && paths[i].starts_with(&prefix) {
                i += 1;
            }
            push_line(
                &mut out,
                cutoff,
                &format!("{}/ … ({} entries)", comps[cutoff], i - start),
            );
        }
    }

    out
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}

/// Last-resort flat listing, hard-bounded at `max_chars`.
fn flat_listing(paths: &[&str], max_chars: usize) -> String {
    let mut out = String::new();
    let mut shown = 0;
    for path in paths {
        let line_chars = path.chars().count() + 1;
        // Reserve room for the trailing omission marker
        if out.chars().count() + line_chars + 24 > max_chars {
            break;
        }
        out.push_str(path);
        out.push('\n');
        shown += 1;
    }
    if shown < paths.len() {
        let marker = format!("… (+{} more)\n", paths.len() - shown);
        if out.chars().count() + marker.chars().count() <= max_chars {
            out.push_str(&marker);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> Vec<TreeNode> {
        paths.iter().map(|p| TreeNode::file(*p, None)).collect()
    }

    #[test]
    fn test_nested_rendering() {
        let nodes = files(&["README.md", "src/main.rs", "src/util/helpers.rs"]);
        let out = render_tree(&nodes, 10_000);
        assert_eq!(
            out,
            "README.md\nsrc/\n  main.rs\n  util/\n    helpers.rs\n"
        );
    }

    #[test]
    fn test_rendering_is_deterministic_and_sorted() {
        let nodes = files(&["b.txt", "a.txt", "src/z.rs", "src/a.rs"]);
        let first = render_tree(&nodes, 10_000);
        let second = render_tree(&nodes, 10_000);
        assert_eq!(first, second);
        assert!(first.find("a.txt").unwrap() < first.find("b.txt").unwrap());
    }

    #[test]
    fn test_collapses_deep_subtrees_with_marker() {
        let deep: Vec<String> = (0..50)
            .map(|i| format!("src/generated/deep/nested/file{:02}.rs", i))
            .collect();
        let mut paths: Vec<&str> = deep.iter().map(String::as_str).collect();
        paths.push("README.md");
        let nodes: Vec<TreeNode> = paths.iter().map(|p| TreeNode::file(*p, None)).collect();

        let out = render_tree(&nodes, 200);
        assert!(out.chars().count() <= 200);
        assert!(out.contains('…'), "expected collapse marker in:\n{}", out);
        assert!(out.contains("README.md"));
    }

    #[test]
    fn test_never_exceeds_bound() {
        let many: Vec<String> = (0..500).map(|i| format!("dir{}/file{}.txt", i, i)).collect();
        let nodes: Vec<TreeNode> =
            many.iter().map(|p| TreeNode::file(p.clone(), None)).collect();
        for cap in [50usize, 200, 1_000, 5_000] {
            let out = render_tree(&nodes, cap);
            assert!(
                out.chars().count() <= cap,
                "cap {} exceeded: {}",
                cap,
                out.chars().count()
            );
        }
    }

    #[test]
    fn test_directories_ignored_and_empty_ok() {
        let nodes = vec![TreeNode::dir("src")];
        assert_eq!(render_tree(&nodes, 100), "");
        assert_eq!(render_tree(&[], 100), "");
    }
}
