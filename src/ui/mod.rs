//! Demo web UI: one page plus a JSON endpoint that drives [`TryOnClient`].

pub mod handlers;
pub mod page;
pub mod render;

use actix_web::{middleware, web, App, HttpServer};
use tokio::sync::Semaphore;

use crate::{
    client::TryOnClient,
    config::{ClientConfig, DemoConfig},
    error::Result,
};

/// Upper bound on a JSON body; three base64 images fit comfortably.
pub const MAX_JSON_BYTES: usize = 48 * 1024 * 1024;

pub struct AppState {
    pub client: TryOnClient,
    /// Caps how many generate actions talk to the remote API at once.
    pub gate: Semaphore,
    pub show_gateway_link: bool,
}

impl AppState {
    pub fn new(client: TryOnClient, demo: &DemoConfig) -> Self {
        Self {
            client,
            gate: Semaphore::new(demo.concurrency_limit.max(1)),
            show_gateway_link: demo.show_gateway_link,
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(MAX_JSON_BYTES))
        .route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health))
        .route("/api/try-on", web::post().to(handlers::try_on));
}

pub async fn run(client_config: ClientConfig, demo: DemoConfig) -> Result<()> {
    let client = TryOnClient::new(client_config)?;
    let state = web::Data::new(AppState::new(client, &demo));

    log::info!(
        "Serving demo on http://{}:{} (concurrency limit {})",
        demo.host,
        demo.port,
        demo.concurrency_limit
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(demo.bind_address())?
    .run()
    .await?;

    Ok(())
}
