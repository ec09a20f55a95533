use anyhow::Result;
use job_portal::{start_web_server, Settings};
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    Registry::default()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("job_portal=info,rocket=warn")),
        )
        .init();

    let settings = Settings::load();

    info!("Starting Job Portal API server");
    info!("Server: http://{}:{}", settings.address, settings.port);

    start_web_server(settings).await
}
