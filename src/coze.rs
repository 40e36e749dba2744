use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::Credentials;
use crate::error::Result;
use crate::types::ChatQuery;

/// Body of `POST /open_api/v2/chat`.
#[derive(Debug, Serialize)]
pub struct CozeChatRequest<'a> {
    pub bot_id: &'a str,
    pub user_id: &'a str,
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct CozeClient {
    client: reqwest::Client,
    api_url: Url,
    user_id: String,
}

impl CozeClient {
    pub fn new(client: reqwest::Client, api_url: Url, user_id: String) -> Self {
        Self {
            client,
            api_url,
            user_id,
        }
    }

    /// Sends one chat request and returns the remote JSON untouched.
    ///
    /// The body is passed through whatever the remote status code is; only a
    /// transport failure or a non-JSON body is an error.
    pub async fn chat(&self, credentials: Credentials<'_>, chat: &ChatQuery) -> Result<Value> {
        let request = CozeChatRequest {
            bot_id: credentials.bot_id,
            user_id: &self.user_id,
            query: &chat.query,
            conversation_id: chat.conversation_id.as_deref(),
        };

        debug!(
            "Sending request to Coze API (query length {}, conversation {})",
            chat.query.len(),
            chat.conversation_id.as_deref().unwrap_or("<new>")
        );

        let response = self
            .client
            .post(self.api_url.clone())
            .bearer_auth(credentials.access_token)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Coze API answered with status {status}, passing body through");
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes from Coze API", body.len());

        let reply: Value = serde_json::from_slice(&body)?;
        Ok(reply)
    }
}
