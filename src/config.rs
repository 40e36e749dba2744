use std::env;
use std::net::SocketAddr;

use log::{debug, info, warn};
use url::Url;

use crate::error::{ProxyError, Result, StartupError, StartupResult};

pub const DEFAULT_API_URL: &str = "https://api.coze.com/open_api/v2/chat";
pub const DEFAULT_USER_ID: &str = "vercel_github_user_001";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

pub const BOT_ID_VAR: &str = "COZE_BOT_ID";
pub const ACCESS_TOKEN_VAR: &str = "COZE_PAT";

/// Service configuration, read once at startup and shared by every request.
///
/// The Coze secrets stay optional here: a deployment without them still
/// serves requests, it just answers each one with a configuration error.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_id: Option<String>,
    pub access_token: Option<String>,
    pub user_id: String,
    pub api_url: Url,
    pub bind_addr: SocketAddr,
}

/// Both secrets, present and non-empty.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub bot_id: &'a str,
    pub access_token: &'a str,
}

impl Config {
    pub fn from_env() -> StartupResult<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any variable source. Empty values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StartupResult<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let bot_id = var(BOT_ID_VAR);
        let access_token = var(ACCESS_TOKEN_VAR);

        let user_id = var("COZE_USER_ID").unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        let api_url = var("COZE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url)
            .map_err(|e| StartupError::Config(format!("COZE_API_URL is not a valid URL: {e}")))?;

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|e| StartupError::Config(format!("BIND_ADDR is not a socket address: {e}")))?;

        let config = Self {
            bot_id,
            access_token,
            user_id,
            api_url,
            bind_addr,
        };

        let missing = config.missing_vars();
        if missing.is_empty() {
            info!("Configuration loaded successfully");
        } else {
            warn!(
                "Missing {}; every chat request will be rejected until they are set",
                missing.join(", ")
            );
        }
        debug!(
            "Bot id length: {} characters",
            config.bot_id.as_deref().map_or(0, str::len)
        );
        debug!(
            "Access token length: {} characters",
            config.access_token.as_deref().map_or(0, str::len)
        );
        debug!("Coze user id: {}", config.user_id);
        debug!("Coze API URL: {}", config.api_url);

        Ok(config)
    }

    /// Resolves both secrets, or names every variable that is missing.
    pub fn credentials(&self) -> Result<Credentials<'_>> {
        match (self.bot_id.as_deref(), self.access_token.as_deref()) {
            (Some(bot_id), Some(access_token)) => Ok(Credentials {
                bot_id,
                access_token,
            }),
            _ => Err(ProxyError::MissingCredentials(self.missing_vars())),
        }
    }

    fn missing_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.bot_id.is_none() {
            missing.push(BOT_ID_VAR);
        }
        if self.access_token.is_none() {
            missing.push(ACCESS_TOKEN_VAR);
        }
        missing
    }
}
