use dotenv::dotenv;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wedding_rsvp::app;
use wedding_rsvp::modules::Modules;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "wedding_rsvp=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let modules = match Modules::load_from_settings().await {
        Ok(modules) => modules,
        Err(e) => {
            error!("Failed to load modules: {e:#}");
            std::process::exit(1);
        }
    };

    info!("Starting server");
    info!("Listening on {}", modules.app.addr);
    axum::Server::bind(&modules.app.addr)
        .serve(app(modules.state()).into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("Failed to run axum server");
}
