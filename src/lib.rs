pub mod config;
pub mod coze;
pub mod error;
pub mod handler;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, header},
    routing::any,
};
use log::{debug, info};
use tower_http::set_header::SetResponseHeaderLayer;

use config::Config;
use coze::CozeClient;
use error::StartupResult;

pub const CHAT_ROUTE: &str = "/api/coze-chat";

/// Shared by every request; immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub coze: CozeClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: Config, client: reqwest::Client) -> Self {
        let coze = CozeClient::new(client, config.api_url.clone(), config.user_id.clone());
        Self {
            config: Arc::new(config),
            coze,
        }
    }
}

/// Builds the router. Every response, rejections included, carries the
/// permissive cross-origin headers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(CHAT_ROUTE, any(handler::chat_proxy))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST"),
        ))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}

fn cors_header(name: HeaderName, value: HeaderValue) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, value)
}

/// Run the proxy until Ctrl-C.
pub async fn run() -> StartupResult<()> {
    info!("Initializing chat proxy");
    let config = Config::from_env()?;
    let bind_addr = config.bind_addr;

    debug!("Building router");
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Chat proxy listening on {}{CHAT_ROUTE}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received, shutting down...");
            }
        })
        .await?;

    Ok(())
}
