use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use repolens_core::RepoLensError;
use repolens_github::GitHubError;
use repolens_llm::LlmError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: String,
}

impl ErrorEnvelope {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: hint.into(),
        }
    }
}

pub struct AppError {
    pub status: StatusCode,
    pub body: ErrorEnvelope,
}

impl AppError {
    pub fn bad_request(code: &str, message: impl Into<String>, hint: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorEnvelope::new(code, message, hint),
        }
    }

    pub fn bad_gateway(code: &str, message: impl Into<String>, hint: &str) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            body: ErrorEnvelope::new(code, message, hint),
        }
    }

    pub fn internal(msg: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorEnvelope::new(
                "internal_error",
                msg.to_string(),
                "Check service logs for details",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, axum::Json(self.body)).into_response()
    }
}

impl From<GitHubError> for AppError {
    fn from(err: GitHubError) -> Self {
        match &err {
            GitHubError::InvalidUrl(_) => AppError::bad_request(
                "invalid_url",
                err.to_string(),
                "Provide a URL like https://github.com/owner/repo",
            ),
            GitHubError::Api { .. } | GitHubError::TruncatedTree => AppError::bad_request(
                "repo_unavailable",
                err.to_string(),
                "The repository may be private, empty, or too large",
            ),
            GitHubError::MalformedResponse(_) | GitHubError::Http(_) => {
                AppError::bad_gateway("github_error", err.to_string(), "Try again later")
            }
        }
    }
}

impl From<RepoLensError> for AppError {
    fn from(err: RepoLensError) -> Self {
        match &err {
            RepoLensError::EmptyListing => AppError::bad_request(
                "empty_repository",
                err.to_string(),
                "The repository contains no summarizable files",
            ),
            _ => AppError::internal(err),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match &err {
            LlmError::MissingApiKey => AppError::internal(err),
            _ => AppError::bad_gateway(
                "summarizer_failed",
                err.to_string(),
                "The LLM provider rejected or failed the request",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_error_status_mapping() {
        let err = AppError::from(GitHubError::InvalidUrl("x".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.code, "invalid_url");

        let err = AppError::from(GitHubError::Api {
            status: 404,
            message: "nope".into(),
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = AppError::from(GitHubError::MalformedResponse("bad json".into()));
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_core_error_status_mapping() {
        let err = AppError::from(RepoLensError::EmptyListing);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.code, "empty_repository");

        let err = AppError::from(RepoLensError::Config("bad".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_llm_error_status_mapping() {
        let err = AppError::from(LlmError::EmptyReply);
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.body.code, "summarizer_failed");

        let err = AppError::from(LlmError::MissingApiKey);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
