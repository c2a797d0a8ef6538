//! Web API module for Monument Designer.
//!
//! This module provides the REST API the designer front end talks to:
//! catalog loading, section views, the customer's orders and photo uploads.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/catalog/{id}` - Load the catalog for a product (optional ?lang=&country=&mode=)
//! - `GET /api/catalog/{id}/sections` - Section views for a product
//! - `GET /api/orders` - Orders of the signed-in account, with items and payments
//! - `POST /api/upload` - Store a masked photo (multipart)

pub mod orders;
pub mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::context::{DesignContext, SectionView, Sections};
use crate::error::CatalogError;
use crate::models::{Catalog, DesignMode};
use crate::services::{source_for_root, CatalogLoader, CatalogSource, LoadOptions, LoadToken};
use crate::store::{OrderStore, SqliteOrderStore};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
///
/// Catalog loads are independent per request; each gets its own
/// [`LoadToken`], so concurrent clients never cancel one another.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Catalog loader over the configured document root
    loader: CatalogLoader,
    /// Order storage
    store: Arc<dyn OrderStore>,
}

impl AppState {
    /// Creates the application state from configuration, opening the
    /// catalog source and the order database.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let source = source_for_root(&config.paths.xml_root)?;

        if let Some(dir) = config.paths.database.parent() {
            std::fs::create_dir_all(dir).context(format!(
                "Failed to create database directory: {}",
                dir.display()
            ))?;
        }
        let store = SqliteOrderStore::open(&config.paths.database).context(format!(
            "Failed to open order database: {}",
            config.paths.database.display()
        ))?;

        Ok(Self::with_parts(config, source, Arc::new(store)))
    }

    /// Creates the application state from explicit parts.
    pub fn with_parts(
        config: Config,
        source: Arc<dyn CatalogSource>,
        store: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            loader: CatalogLoader::new(source),
            store,
        }
    }

    /// Returns the application configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Query parameters for catalog loads. Missing values fall back to the
/// configured catalog defaults.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Language code (`en_EN`).
    pub lang: Option<String>,
    /// Two-letter country code.
    pub country: Option<String>,
    /// Design mode (`2d`, `3d`, `web`).
    pub mode: Option<DesignMode>,
}

/// Section views of a product.
#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    /// Product the sections belong to.
    pub product_id: String,
    /// One view per visible section, in display order.
    pub sections: Vec<SectionView>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Path Validation (Security)
// ============================================================================

/// Validates a path segment that ends up in a document or file name.
///
/// Returns the segment or an error if it could escape its directory.
fn validate_filename(filename: &str) -> Result<&str, ApiError> {
    if filename.is_empty() {
        return Err(ApiError::new("Filename cannot be empty"));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ApiError::new(
            "Invalid filename: path traversal not allowed",
        ));
    }

    // Reject hidden files
    if filename.starts_with('.') {
        return Err(ApiError::new("Invalid filename: hidden files not allowed"));
    }

    Ok(filename)
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Runs one catalog load for a request.
async fn load_catalog(
    state: &AppState,
    product_id: &str,
    query: &CatalogQuery,
) -> Result<Catalog, (StatusCode, Json<ApiError>)> {
    let product_id =
        validate_filename(product_id).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;

    let defaults = &state.config.catalog;
    let options = LoadOptions::new(
        product_id,
        query.lang.clone().unwrap_or_else(|| defaults.language.clone()),
    )
    .with_country(query.country.clone().unwrap_or_else(|| defaults.country.clone()))
    .with_mode(query.mode.unwrap_or(defaults.mode));

    state
        .loader
        .load(&options, &LoadToken::new())
        .await
        .map_err(|e| match e {
            CatalogError::ProductNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ApiError::with_details("Product not found", e.to_string())),
            ),
            _ => (
                StatusCode::BAD_GATEWAY,
                Json(ApiError::with_details("Failed to load catalog", e.to_string())),
            ),
        })
}

/// Load the catalog for a product.
async fn get_catalog(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Catalog> {
    load_catalog(&state, &product_id, &query).await.map(Json)
}

/// Render the section views a product offers.
async fn get_sections(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<SectionsResponse> {
    let catalog = load_catalog(&state, &product_id, &query).await?;

    let mode = query.mode.unwrap_or(state.config.catalog.mode);
    let mut ctx = DesignContext::new(state.config.catalog.settings(), mode);
    if let Some(lang) = &query.lang {
        ctx.settings.language.clone_from(lang);
    }
    ctx.set_catalog(catalog);

    let sections = Sections::for_context(&ctx).render_all(&ctx);
    Ok(Json(SectionsResponse {
        product_id,
        sections,
    }))
}

// ============================================================================
// Router
// ============================================================================

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    // The designer is served from another origin during development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Catalog endpoints
        .route("/api/catalog/{id}", get(get_catalog))
        .route("/api/catalog/{id}/sections", get(get_sections))
        // Account endpoints
        .route("/api/orders", get(orders::list_orders))
        // Photo uploads
        .route(
            "/api/upload",
            post(upload::upload_photo).layer(DefaultBodyLimit::max(upload::MAX_UPLOAD_BYTES)),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the state cannot be built or the server fails to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let app = create_router(state);

    info!("Starting {} web server on {}", APP_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename_valid() {
        assert!(validate_filename("5").is_ok());
        assert!(validate_filename("2400").is_ok());
        assert!(validate_filename("photo_masked.png").is_ok());
    }

    #[test]
    fn test_validate_filename_path_traversal() {
        assert!(validate_filename("../countries24").is_err());
        assert!(validate_filename("foo/../bar").is_err());
        assert!(validate_filename("..").is_err());
    }

    #[test]
    fn test_validate_filename_absolute_path() {
        assert!(validate_filename("/etc/passwd").is_err());
        assert!(validate_filename("\\Windows\\System32").is_err());
    }

    #[test]
    fn test_validate_filename_hidden_files() {
        assert!(validate_filename(".hidden").is_err());
        assert!(validate_filename(".env").is_err());
    }

    #[test]
    fn test_validate_filename_empty() {
        assert!(validate_filename("").is_err());
    }

    #[test]
    fn test_api_error_skips_empty_details() {
        let json = serde_json::to_value(ApiError::new("Unauthorized")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Unauthorized" }));

        let json = serde_json::to_value(ApiError::with_details("Failed", "boom")).unwrap();
        assert_eq!(json["details"], "boom");
    }
}
