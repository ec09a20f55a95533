// src/web/handlers/system_handlers.rs
use tracing::debug;

pub const LIVENESS_MESSAGE: &str = "Job Portal Backend is running";

pub async fn root_handler() -> &'static str {
    debug!("Liveness check");
    LIVENESS_MESSAGE
}
