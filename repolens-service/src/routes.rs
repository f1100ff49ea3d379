use crate::error::AppError;
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;
use repolens_core::pipeline;
use repolens_github::RepoRef;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

// POST /summarize
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub repo_url: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub technologies: Vec<String>,
    pub structure: String,
}

pub async fn summarize(
    State(state): State<SharedState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4();

    let repo = RepoRef::parse(&req.repo_url)?;
    tracing::info!(%request_id, repo = %repo, "summarize request");

    let branch = state.github.default_branch(&repo).await?;
    let nodes = state.github.tree(&repo, &branch).await?;
    tracing::info!(%request_id, branch = %branch, entries = nodes.len(), "fetched tree listing");

    let fetcher = Arc::new(state.github.content_fetcher(&repo, &branch));
    let bundle = pipeline::run(&nodes, &state.rules, &state.config, fetcher).await?;
    if bundle.degraded {
        tracing::warn!(%request_id, "no file contents could be fetched; summarizing tree only");
    }

    let summary = state.llm.summarize(&repo.name, &bundle).await?;
    tracing::info!(
        %request_id,
        duration_ms = start.elapsed().as_millis() as u64,
        "summarize complete"
    );

    Ok(Json(SummarizeResponse {
        summary: summary.summary,
        technologies: summary.technologies,
        structure: summary.structure,
    }))
}

// GET /status
#[derive(Serialize)]
pub struct ServiceStatus {
    pub service: String,
    pub version: String,
}

pub async fn status() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        service: "repolens-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes() {
        let req: SummarizeRequest =
            serde_json::from_str(r#"{"repo_url": "https://github.com/a/b"}"#).unwrap();
        assert_eq!(req.repo_url, "https://github.com/a/b");
    }

    #[test]
    fn test_response_shape() {
        let resp = SummarizeResponse {
            summary: "s".into(),
            technologies: vec!["Rust".into()],
            structure: "flat".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["summary"], "s");
        assert_eq!(json["technologies"][0], "Rust");
        assert_eq!(json["structure"], "flat");
    }
}
