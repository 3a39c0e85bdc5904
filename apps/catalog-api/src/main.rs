use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::Store;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    // The store starts empty; handlers answer 503 until the background
    // connection task fills it in.
    let store = Store::new();

    info!("Connecting to MongoDB at {}", config.mongodb.url());
    spawn_mongo_connect(config.mongodb.clone(), store.clone());

    // Initialize the application state
    let state = AppState {
        config,
        store,
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge root-level meta endpoints
    let app = router.merge(api::meta::router(state.clone()));

    info!(
        "Starting {} v{} on {}",
        state.config.app.name,
        state.config.app.version,
        state.config.server.address()
    );

    axum_helpers::create_app(app, &state.config.server).await?;

    info!("Catalog API shutdown complete");
    Ok(())
}

/// Connect to MongoDB in the background and flip the store to ready.
///
/// The HTTP server is already accepting traffic while this runs. If the
/// connection cannot be established after retries the process exits, since
/// the API can never become useful without its database.
fn spawn_mongo_connect(config: database::mongodb::MongoConfig, store: Store) {
    tokio::spawn(async move {
        match database::mongodb::connect_from_config_with_retry(&config, None).await {
            Ok(client) => {
                let db = client.database(config.database());
                info!(
                    "Successfully connected to MongoDB database: {}",
                    config.database()
                );
                store.set(db);
            }
            Err(e) => {
                error!("Failed to connect to MongoDB: {}", e);
                std::process::exit(1);
            }
        }
    });
}
