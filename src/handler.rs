//! The chat proxy endpoint.

use axum::{Json, body::Bytes, extract::State, http::Method};
use log::{debug, error, info, warn};
use serde_json::Value;

use crate::AppState;
use crate::error::{ProxyError, Result};
use crate::types::ChatQuery;

/// Validates one browser request, forwards it to Coze and relays the answer.
///
/// Checks run in a fixed order (method, query, credentials) and the outbound
/// call only happens once all three pass.
pub async fn chat_proxy(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<Value>> {
    match forward(&state, &method, &body).await {
        Ok(value) => Ok(Json(value)),
        Err(e) => {
            match &e {
                ProxyError::MethodNotAllowed(_) | ProxyError::MissingQuery => {
                    warn!("Rejected {method} request: {e}");
                }
                _ => error!("Chat proxy request failed: {e}"),
            }
            Err(e)
        }
    }
}

async fn forward(state: &AppState, method: &Method, body: &[u8]) -> Result<Value> {
    if method != Method::POST {
        return Err(ProxyError::MethodNotAllowed(method.clone()));
    }

    let chat = ChatQuery::from_body(body)?;
    info!(
        "Received chat query ({} characters, conversation {})",
        chat.query.chars().count(),
        chat.conversation_id.as_deref().unwrap_or("<new>")
    );

    let credentials = state.config.credentials()?;

    let reply = state.coze.chat(credentials, &chat).await?;
    debug!("Relaying Coze response to caller");
    Ok(reply)
}
