use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const UPSTREAM_FAILURE_LABEL: &str = "Proxy request failed";
pub const UPSTREAM_FAILURE_TIP: &str =
    "Check that COZE_BOT_ID and COZE_PAT are valid and that the Coze API is reachable";

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("Missing required parameter: query")]
    MissingQuery,

    #[error("Missing configuration: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Coze response is not valid JSON: {0}")]
    UpstreamJson(#[from] serde_json::Error),
}

/// Failures while bringing the service up. These end the process and never
/// reach a caller.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::MissingQuery => StatusCode::BAD_REQUEST,
            ProxyError::MissingCredentials(_)
            | ProxyError::Reqwest(_)
            | ProxyError::UpstreamJson(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message shown to the browser caller.
    pub fn user_message(&self) -> String {
        match self {
            ProxyError::MethodNotAllowed(_) => {
                "Only POST requests are supported, please call this endpoint with POST".to_string()
            }
            ProxyError::MissingQuery => {
                "Missing required parameter: query (the user's question)".to_string()
            }
            ProxyError::MissingCredentials(missing) => format!(
                "Server environment is not configured: please set COZE_BOT_ID and COZE_PAT (missing: {})",
                missing.join(", ")
            ),
            ProxyError::Reqwest(_) | ProxyError::UpstreamJson(_) => {
                UPSTREAM_FAILURE_LABEL.to_string()
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ProxyError::Reqwest(_) | ProxyError::UpstreamJson(_) => json!({
                "error": UPSTREAM_FAILURE_LABEL,
                "detail": self.to_string(),
                "tip": UPSTREAM_FAILURE_TIP,
            }),
            _ => json!({ "error": self.user_message() }),
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
pub type StartupResult<T> = std::result::Result<T, StartupError>;
