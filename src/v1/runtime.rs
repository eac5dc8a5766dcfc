use super::config::Settings;

/// Plain fmt output without timestamps; CloudWatch adds ingestion time.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
}

/// Cold-start configuration. A `.env` file is honoured for local runs.
pub fn load_settings() -> Settings {
    if let Err(e) = dotenv::dotenv() {
        tracing::debug!("no .env file loaded: {e}");
    }
    let settings = Settings::from_env();
    tracing::info!(table = ?settings.table, "Loaded settings");
    settings
}
