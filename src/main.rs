use load_layout::{api, config::AppConfig};

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("⚠️ Could not load .env: {}", err);
        }
    }

    // No `log` sink is installed: the service reports through the console
    // banners below, and engine `debug!`/`warn!` records stay silent unless an
    // embedding application installs a logger.
    let app_config = AppConfig::from_env();

    println!("🚛 Load layout service starting...");
    api::start_api_server(app_config.api, app_config.engine).await;
}
