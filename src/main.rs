use tryon_demo::{
    logger::{self, LoggerConfig},
    ClientConfig, DemoConfig,
};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;

    if env_loaded {
        log::info!(".env file loaded");
    } else {
        log::warn!("No .env file found, using process environment");
    }

    let client_config = ClientConfig::from_env();
    let demo_config = DemoConfig::from_env();

    logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &demo_config.host,
        demo_config.port,
    );
    log::info!("Try-on API: {}", client_config.base_url);

    tryon_demo::ui::run(client_config, demo_config).await?;
    Ok(())
}
