//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        FileCategorySource, HttpCategorySource, MemoryDetailCache, PgDocumentStore,
        RakutenRecipeApi,
    },
    config::Config,
    error::ApiError,
    web::{
        add_history_handler, create_user_handler, get_user_handler, popular_categories_handler,
        recipe_detail_handler, remove_favorite_handler, rest::ApiDoc, search_categories_handler,
        search_recipes_handler, select_recipe_handler, state::AppState, upsert_favorite_handler,
    },
};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post, put},
    Router,
};
use foodmatch_core::category_index::CategoryIndex;
use foodmatch_core::gateway::RecipeGateway;
use foodmatch_core::ports::CategorySource;
use foodmatch_core::profile::ProfileStore;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");
    if config.rakuten_app_id.is_none() {
        warn!("RAKUTEN_APP_ID is not set; recipe searches will answer with sample data");
    }

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let doc_store = Arc::new(PgDocumentStore::new(db_pool.clone()));
    info!("Running database migrations...");
    doc_store.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Initialize Service Adapters ---
    let http_client = reqwest::Client::new();

    let category_source: Arc<dyn CategorySource> = match &config.categories_url {
        Some(url) => Arc::new(HttpCategorySource::new(http_client.clone(), url.clone())),
        None => Arc::new(FileCategorySource::new(config.categories_path.clone())),
    };
    let categories = Arc::new(CategoryIndex::new(category_source));
    // Warm the category cache so the first search does not pay for the load.
    // A failure here is already logged and degrades to an empty table.
    categories.load().await;

    let recipe_api = Arc::new(RakutenRecipeApi::new(
        http_client,
        config.rakuten_api_base.clone(),
        config.rakuten_app_id.clone(),
    ));
    let detail_cache = Arc::new(MemoryDetailCache::new());

    let gateway = Arc::new(RecipeGateway::new(
        recipe_api,
        detail_cache,
        categories.clone(),
    ));
    let profiles = Arc::new(ProfileStore::new(doc_store));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        categories,
        gateway,
        profiles,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route("/categories", get(search_categories_handler))
        .route("/categories/popular", get(popular_categories_handler))
        .route("/recipes", get(search_recipes_handler))
        .route("/recipes/selected", post(select_recipe_handler))
        .route("/recipes/{id}", get(recipe_detail_handler))
        .route("/users", post(create_user_handler))
        .route("/users/{uid}", get(get_user_handler))
        .route("/users/{uid}/favorites", put(upsert_favorite_handler))
        .route(
            "/users/{uid}/favorites/{recipe_id}",
            axum::routing::delete(remove_favorite_handler),
        )
        .route("/users/{uid}/histories", post(add_history_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
