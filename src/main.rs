// --- Malla Interactiva - Archivo principal ---

use malla_interactiva::config::Config;
use malla_interactiva::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // .env antes del logger para que RUST_LOG definido ahí tenga efecto
    let _ = dotenv::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("=== Malla Interactiva (API) ===");
    let config = Config::from_env();
    run_server(config).await
}
