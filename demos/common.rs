use alphasms::{AlphaSmsClient, AlphaSmsClientBuilder, ClientConfig};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

/// Credentials come from `ALPHASMS_KEY` or `ALPHASMS_LOGIN` + `ALPHASMS_PASSWORD`.
pub fn client_from_env() -> Result<AlphaSmsClient, Box<dyn std::error::Error>> {
    let config = ClientConfig {
        login: std::env::var("ALPHASMS_LOGIN").ok(),
        password: std::env::var("ALPHASMS_PASSWORD").ok(),
        key: std::env::var("ALPHASMS_KEY").ok(),
        sender: std::env::var("ALPHASMS_SENDER").ok(),
        endpoint: std::env::var("ALPHASMS_ENDPOINT").ok(),
        ..Default::default()
    };
    let builder: AlphaSmsClientBuilder = config.into_builder()?;
    Ok(builder.build()?)
}
