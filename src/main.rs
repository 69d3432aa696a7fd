use dotenv::dotenv;
use tracing::{info, warn};

use foreverus_backend::app::app::App;
use foreverus_backend::util::logger::Logger;

#[tokio::main]
async fn main() {
    // Keep the guards alive for the lifetime of the process so the
    // non-blocking file writers keep flushing.
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("🚀 Starting ForeverUs Backend");

    match dotenv() {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = App::new().await;
    app.start().await;
}
