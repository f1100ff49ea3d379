//! Configuration for repolens

use crate::RepoLensError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default configuration as TOML
pub const DEFAULT_CONFIG: &str = r#"# Repolens Configuration

[selection]
# Maximum number of files whose contents are sent downstream
max_files = 10
# Aggregate declared-size budget (bytes) across selected files
max_bytes = 262144
# Declared size used for tree entries with no size (never zero)
default_size_estimate = 16384

[render]
# Maximum characters for the rendered tree view
max_tree_chars = 20000

[assemble]
# Aggregate character cap for the assembled context (tree + file contents)
max_context_chars = 300000

[fetch]
# Concurrent content fetches in flight
concurrency = 4
# Timeout per individual fetch (e.g., "10s", "2m")
timeout = "10s"
# End-to-end deadline for the fetch stage
deadline = "60s"

[ignore]
# Glob patterns per noise category, gitignore-style:
# a trailing slash excludes the directory and everything beneath it,
# a bare name or *-pattern matches at any depth.
binary_media = [
    "*.png", "*.jpg", "*.jpeg", "*.gif", "*.ico", "*.pdf", "*.svg",
    "*.eot", "*.ttf", "*.woff", "*.woff2",
    "*.mp4", "*.webm", "*.mp3", "*.wav",
    "*.zip", "*.tar", "*.gz", "*.7z",
    "*.exe", "*.dll", "*.so", "*.dylib",
]
build_artifacts = [
    "build/", "dist/", "target/", "out/", "__pycache__/", "*.pyc", "__init__.py",
    ".next/", ".nuxt/", ".cache/",
]
lock_files = [
    "package-lock.json", "yarn.lock", "pnpm-lock.yaml", "poetry.lock",
    "Pipfile.lock", "Gemfile.lock", "Cargo.lock",
]
dependencies = [
    "node_modules/", "vendor/", "venv/", ".venv/", "env/",
]
vcs_meta = [
    ".git/", ".github/", ".vscode/", ".idea/", "*.iml", ".env", ".DS_Store",
]
"#;

/// Repolens configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub assemble: AssembleConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_size_estimate")]
    pub default_size_estimate: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_max_tree_chars")]
    pub max_tree_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembleConfig {
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_fetch_timeout")]
    pub timeout: String,
    #[serde(default = "default_deadline")]
    pub deadline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default = "default_binary_media")]
    pub binary_media: Vec<String>,
    #[serde(default = "default_build_artifacts")]
    pub build_artifacts: Vec<String>,
    #[serde(default = "default_lock_files")]
    pub lock_files: Vec<String>,
    #[serde(default = "default_dependencies")]
    pub dependencies: Vec<String>,
    #[serde(default = "default_vcs_meta")]
    pub vcs_meta: Vec<String>,
}

// Default value functions
fn default_max_files() -> usize {
    10
}
fn default_max_bytes() -> u64 {
    262_144
}
fn default_size_estimate() -> u64 {
    16_384
}
fn default_max_tree_chars() -> usize {
    20_000
}
fn default_max_context_chars() -> usize {
    300_000
}
fn default_concurrency() -> usize {
    4
}
fn default_fetch_timeout() -> String {
    "10s".to_string()
}
fn default_deadline() -> String {
    "60s".to_string()
}
fn default_binary_media() -> Vec<String> {
    [
        "*.png", "*.jpg", "*.jpeg", "*.gif", "*.ico", "*.pdf", "*.svg", "*.eot", "*.ttf",
        "*.woff", "*.woff2", "*.mp4", "*.webm", "*.mp3", "*.wav", "*.zip", "*.tar", "*.gz",
        "*.7z", "*.exe", "*.dll", "*.so", "*.dylib",
    ]
    .map(String::from)
    .to_vec()
}
fn default_build_artifacts() -> Vec<String> {
    [
        "build/", "dist/", "target/", "out/", "__pycache__/", "*.pyc", "__init__.py",
        ".next/", ".nuxt/", ".cache/",
    ]
    .map(String::from)
    .to_vec()
}
fn default_lock_files() -> Vec<String> {
    [
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "poetry.lock",
        "Pipfile.lock",
        "Gemfile.lock",
        "Cargo.lock",
    ]
    .map(String::from)
    .to_vec()
}
fn default_dependencies() -> Vec<String> {
    ["node_modules/", "vendor/", "venv/", ".venv/", "env/"]
        .map(String::from)
        .to_vec()
}
fn default_vcs_meta() -> Vec<String> {
    [
        ".git/", ".github/", ".vscode/", ".idea/", "*.iml", ".env", ".DS_Store",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            max_bytes: default_max_bytes(),
            default_size_estimate: default_size_estimate(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_tree_chars: default_max_tree_chars(),
        }
    }
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            max_context_chars: default_max_context_chars(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout: default_fetch_timeout(),
            deadline: default_deadline(),
        }
    }
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            binary_media: default_binary_media(),
            build_artifacts: default_build_artifacts(),
            lock_files: default_lock_files(),
            dependencies: default_dependencies(),
            vcs_meta: default_vcs_meta(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse config from TOML string
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| RepoLensError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject budgets the pipeline cannot run under.
    pub fn validate(&self) -> crate::Result<()> {
        if self.selection.max_files == 0 {
            return Err(RepoLensError::Config("max_files must be positive".into()));
        }
        if self.selection.max_bytes == 0 {
            return Err(RepoLensError::Config("max_bytes must be positive".into()));
        }
        if self.selection.default_size_estimate == 0 {
            return Err(RepoLensError::Config(
                "default_size_estimate must be positive".into(),
            ));
        }
        if self.render.max_tree_chars == 0 {
            return Err(RepoLensError::Config(
                "max_tree_chars must be positive".into(),
            ));
        }
        if self.assemble.max_context_chars == 0 {
            return Err(RepoLensError::Config(
                "max_context_chars must be positive".into(),
            ));
        }
        if self.fetch.concurrency == 0 {
            return Err(RepoLensError::Config("concurrency must be positive".into()));
        }
        for (field, value) in [
            ("fetch.timeout", &self.fetch.timeout),
            ("fetch.deadline", &self.fetch.deadline),
        ] {
            if parse_duration(value).is_none() {
                return Err(RepoLensError::Config(format!(
                    "{} is not a valid duration: {:?}",
                    field, value
                )));
            }
        }
        Ok(())
    }

    /// Per-fetch timeout as Duration
    pub fn fetch_timeout(&self) -> Duration {
        parse_duration(&self.fetch.timeout).unwrap_or(Duration::from_secs(10))
    }

    /// End-to-end fetch-stage deadline as Duration
    pub fn fetch_deadline(&self) -> Duration {
        parse_duration(&self.fetch.deadline).unwrap_or(Duration::from_secs(60))
    }
}

/// Parse duration string (e.g., "10s", "2m", "1h")
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.len() < 2 {
        return None;
    }

    let (num_str, unit) = s.split_at(s.len() - 1);
    let num: u64 = num_str.parse().ok()?;

    match unit {
        "s" => Some(Duration::from_secs(num)),
        "m" => Some(Duration::from_secs(num * 60)),
        "h" => Some(Duration::from_secs(num * 3600)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = Config::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.selection.max_files, 10);
        assert_eq!(config.selection.max_bytes, 262_144);
        assert_eq!(config.assemble.max_context_chars, 300_000);
        assert!(config.ignore.dependencies.contains(&"node_modules/".to_string()));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.fetch.concurrency, 4);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.fetch_deadline(), Duration::from_secs(60));
    }

    #[test]
    fn test_nonpositive_budget_rejected() {
        let err = Config::from_toml("[selection]\nmax_files = 0\n").unwrap_err();
        assert!(matches!(err, RepoLensError::Config(_)));

        let err = Config::from_toml("[selection]\nmax_bytes = 0\n").unwrap_err();
        assert!(matches!(err, RepoLensError::Config(_)));
    }

    #[test]
    fn test_bad_duration_rejected() {
        let err = Config::from_toml("[fetch]\ntimeout = \"soon\"\n").unwrap_err();
        assert!(matches!(err, RepoLensError::Config(_)));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Some(Duration::from_secs(300)));
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_duration("invalid"), None);
    }
}
