use std::sync::Arc;

use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use ward_core::{
    CoreConfig, DEFAULT_REST_ADDR, HttpPeopleSource, PatientService,
    config::{page_size_from_env_value, people_source_url_from_env_value, seed_from_env_value},
};

/// Main entry point for the Ward application
///
/// Resolves configuration from the environment, loads the patient list once from the people
/// source and serves the REST API. A failed startup load is logged and the server starts with
/// an empty store; `POST /patients/reload` can retry it later.
///
/// # Environment Variables
/// - `WARD_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `WARD_PEOPLE_URL`: people source URL (default: "https://dummyjson.com/users")
/// - `WARD_PAGE_SIZE`: patients per page in list responses (default: 10)
/// - `WARD_SEED`: seed for reproducible admission data (default: unseeded)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ward=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::new(
        people_source_url_from_env_value(std::env::var("WARD_PEOPLE_URL").ok()),
        page_size_from_env_value(std::env::var("WARD_PAGE_SIZE").ok())?,
        seed_from_env_value(std::env::var("WARD_SEED").ok())?,
    )?;
    let rest_addr = std::env::var("WARD_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let source = Arc::new(HttpPeopleSource::new(cfg.people_source_url())?);
    let mut service = PatientService::new(&cfg);
    match service.load_from(source.as_ref(), &mut cfg.rng()).await {
        Ok(count) => tracing::info!("++ Loaded {} patients", count),
        Err(_) => tracing::warn!("Starting with an empty patient list"),
    }

    let state = AppState::new(Arc::new(cfg), Arc::new(RwLock::new(service)), source);
    let app = api_rest::router(state);

    tracing::info!("++ Starting Ward REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
