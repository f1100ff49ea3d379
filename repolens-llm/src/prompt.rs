//! Prompt rendering for context bundles

use repolens_core::{ContextBundle, FileContent};

pub fn system_prompt(repo_name: &str) -> String {
    format!(
        r#"You are an expert software engineer analyzing the {repo_name} repository.
I will provide you with the directory tree structure of the project, and the raw text contents of its most important files.

Your task is to analyze this context and return a JSON object with exactly the following structure:
{{
  "summary": "A human-readable description of what the project does",
  "technologies": ["List", "of", "main", "technologies", "languages", "and", "frameworks"],
  "structure": "Brief description of the project structure"
}}

Respond ONLY with valid JSON."#
    )
}

/// Render the bundle as the user message: tree first, then one section per
/// selected file. Unfetchable files keep an explicit marker so the model
/// knows they were selected but unavailable.
pub fn user_prompt(bundle: &ContextBundle) -> String {
    let mut out = format!("Directory Tree:\n{}\n\nKey File Contents:\n", bundle.tree_text);

    for file in &bundle.files {
        match &file.content {
            FileContent::Text { text, truncated } => {
                if text.trim().is_empty() {
                    continue;
                }
                out.push_str(&format!("\n--- FILE: {} ---\n{}\n", file.path, text));
                if *truncated {
                    out.push_str("...[CONTENT TRUNCATED]...\n");
                }
            }
            FileContent::Failed { reason } => {
                out.push_str(&format!("\n--- FILE: {} ---\n[unavailable: {}]\n", file.path, reason));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use repolens_core::{BundleFile, FetchFailure};

    fn bundle() -> ContextBundle {
        ContextBundle {
            tree_text: "README.md\nsrc/\n  main.rs\n".to_string(),
            files: vec![
                BundleFile {
                    path: "README.md".to_string(),
                    content: FileContent::Text {
                        text: "# demo".to_string(),
                        truncated: false,
                    },
                },
                BundleFile {
                    path: "src/main.rs".to_string(),
                    content: FileContent::Failed {
                        reason: FetchFailure::NotFound,
                    },
                },
            ],
            truncated: false,
            degraded: false,
        }
    }

    #[test]
    fn test_user_prompt_sections() {
        let prompt = user_prompt(&bundle());
        assert!(prompt.starts_with("Directory Tree:\n"));
        assert!(prompt.contains("--- FILE: README.md ---\n# demo"));
        assert!(prompt.contains("--- FILE: src/main.rs ---\n[unavailable: not found"));
    }

    #[test]
    fn test_truncated_content_is_flagged() {
        let mut bundle = bundle();
        bundle.files[0].content = FileContent::Text {
            text: "partial".to_string(),
            truncated: true,
        };
        let prompt = user_prompt(&bundle);
        assert!(prompt.contains("...[CONTENT TRUNCATED]..."));
    }

    #[test]
    fn test_system_prompt_names_repo() {
        assert!(system_prompt("fastapi").contains("the fastapi repository"));
    }
}
