use log::{error, info};

fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("coze_proxy=info"),
    )
    .format_timestamp_millis()
    .init();
}

#[tokio::main]
async fn main() -> coze_proxy::error::StartupResult<()> {
    init_logging();
    info!("Starting coze-proxy {}", env!("CARGO_PKG_VERSION"));

    coze_proxy::run().await.inspect_err(|e| {
        error!("Proxy stopped with an error: {e}");
    })?;

    info!("Proxy shut down cleanly");
    Ok(())
}
