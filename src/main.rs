use badge_api::config::EnvironmentConfig;
use badge_api::{app, telemetry};
use config::{Config, Environment};
use std::net::SocketAddr;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const IS_DEVELOPMENT: bool = cfg!(debug_assertions);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .add_source(Environment::default().separator("__").try_parsing(true))
        .build()
        .expect("Failed to build settings");

    let cfg: EnvironmentConfig = settings
        .try_deserialize()
        .expect("Invalid environment variables");

    telemetry::setup(cfg.otel_enabled).ok();

    let listener_address = cfg.listen_address.unwrap_or_else(|| {
        let address: SocketAddr = if IS_DEVELOPMENT {
            ([127, 0, 0, 1], 3000).into()
        } else {
            ([0, 0, 0, 0], 8080).into()
        };
        address
    });

    let app = app::create_app(cfg);

    tracing::info!("🚀 Listening on http://{listener_address}");
    let server_result = axum_server::bind(listener_address)
        .serve(app.into_make_service())
        .await;

    if let Err(error) = server_result {
        tracing::error!("Server exited with an error: {error:?}");
    }
}
