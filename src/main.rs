use tracing::info;

use villadesk::{Config, Database, Result, WebServer};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();
    config.validate()?;

    // Initialize logging
    if let Err(e) = villadesk::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        villadesk::logging::init_console_only(&config.logging.level);
    }

    info!("villadesk - villa agency admin server");

    let db = Database::open(&config.database.path).await?;
    villadesk::auth::bootstrap_admin(db.pool(), &config.auth.default_admin_password).await?;

    WebServer::new(&config, db)?.run().await
}
