use repolens_core::{Config, IgnoreRuleSet};
use repolens_github::GitHubClient;
use repolens_llm::{LlmClient, LlmError};
use std::sync::Arc;

pub type SharedState = Arc<AppState>;

/// Process-wide state. The ignore rule set is compiled once here and only
/// ever read afterwards; requests share it without synchronization.
pub struct AppState {
    pub config: Config,
    pub rules: IgnoreRuleSet,
    pub github: GitHubClient,
    pub llm: LlmClient,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("{0}")]
    Config(#[from] repolens_core::RepoLensError),

    #[error("{0}")]
    Llm(#[from] LlmError),
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, StartupError> {
        config.validate()?;
        let rules = IgnoreRuleSet::from_config(&config.ignore)?;
        let llm = LlmClient::from_env()?;
        Ok(Self {
            config,
            rules,
            github: GitHubClient::new(),
            llm,
        })
    }
}
