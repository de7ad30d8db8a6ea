//! REST server for the parts catalog.
//!
//! Every category is served by the same generic handlers, mounted under
//! `/ar15/<slug>`:
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/ar15/{category}/groups` | Create a group |
//! | `GET`  | `/ar15/{category}/groups` | List groups |
//! | `GET`  | `/ar15/{category}/groups/{groupId}` | Read a group |
//! | `PUT`  | `/ar15/{category}/groups/{groupId}` | Update a group |
//! | `POST` | `/ar15/{category}/groups/{groupId}` | Create a variant in the group |
//! | `GET`  | `/ar15/{category}/groups/{groupId}/variants` | List the group's variants |
//! | `GET`  | `/ar15/{category}/variants/{variantId}` | Read a variant |
//! | `PUT`  | `/ar15/{category}/variants/{variantId}` | Update a variant |
//! | `GET`  | `/ar15/{category}/enums` | Enumeration registry (`X-Registry-Version` header) |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! `{category}` is one of `grips`, `handguards`, `trigger-guards`.
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "duplicate_upc", "message": "...", "existingId": "..." } }
//! ```
//!
//! | Code | Status | Extra fields |
//! |------|--------|--------------|
//! | `missing_field` | 400 | `field` |
//! | `duplicate_name` | 400 | `existingId` |
//! | `duplicate_upc` | 400 | `existingId` |
//! | `validation_error` | 400 | `violations` |
//! | `bad_request` | 400 | |
//! | `not_found` | 404 | `id` |
//! | `group_not_found` | 404 | `id` |
//! | `internal` | 500 | |
//!
//! Store failures are logged and reported as `internal` without detail.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use ar15_catalog_core::enums::Registry;
use ar15_catalog_core::models::{GroupInput, GroupSummary, VariantInput, VariantSummary};
use ar15_catalog_core::store::{DocumentStore, InMemoryStore};
use ar15_catalog_core::{Catalog, CatalogError, Grip, Handguard, PartKind, TriggerGuard};

use crate::config::{Backend, Config};
use crate::db;
use crate::migrate;
use crate::sqlite_store::SqliteStore;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    catalog: Catalog,
}

/// Builds the store selected by `[db].backend`.
///
/// For SQLite this opens the database and runs migrations first, so a
/// fresh path is usable without `catalog init`.
pub async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.db.backend {
        Backend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Ok(Arc::new(InMemoryStore::new()))
        }
        Backend::Sqlite => {
            let pool = db::connect(config).await?;
            migrate::migrate(&pool).await?;
            tracing::info!(path = %config.db.path.display(), "opened SQLite store");
            Ok(Arc::new(SqliteStore::new(pool)))
        }
    }
}

/// Starts the HTTP server.
///
/// Binds to `[server].bind` and serves until Ctrl-C.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let app = build_router(Catalog::new(store));

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("catalog server listening on http://{}", config.server.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("catalog server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// The full router: health check plus the routes of every category.
pub fn build_router(catalog: Catalog) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .nest(&category_path::<Grip>(), part_routes::<Grip>())
        .nest(&category_path::<Handguard>(), part_routes::<Handguard>())
        .nest(
            &category_path::<TriggerGuard>(),
            part_routes::<TriggerGuard>(),
        )
        .fallback(handle_fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { catalog })
}

fn category_path<K: PartKind>() -> String {
    format!("/ar15/{}", K::CATEGORY.slug())
}

fn part_routes<K: PartKind>() -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            post(handle_create_group::<K>).get(handle_list_groups::<K>),
        )
        .route(
            "/groups/{group_id}",
            get(handle_get_group::<K>)
                .put(handle_update_group::<K>)
                .post(handle_create_variant::<K>),
        )
        .route("/groups/{group_id}/variants", get(handle_list_variants::<K>))
        .route(
            "/variants/{variant_id}",
            get(handle_get_variant::<K>).put(handle_update_variant::<K>),
        )
        .route("/enums", get(handle_enums::<K>))
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    /// Code-specific fields (`field`, `existingId`, `id`, `violations`).
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Internal error type that converts into an Axum HTTP response.
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
    extra: Map<String, Value>,
}

impl AppError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            extra: Map::new(),
        }
    }

    fn with(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
                extra: self.extra,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        if err.is_client_error() {
            tracing::debug!(error = %err, "rejected request");
        } else {
            tracing::error!(error = ?err, "catalog operation failed");
        }

        let message = err.to_string();
        match err {
            CatalogError::MissingField { field } => {
                AppError::new(StatusCode::BAD_REQUEST, "missing_field", message)
                    .with("field", Value::String(field))
            }
            CatalogError::DuplicateName { existing_id, .. } => {
                AppError::new(StatusCode::BAD_REQUEST, "duplicate_name", message)
                    .with("existingId", Value::String(existing_id))
            }
            CatalogError::DuplicateUpc { existing_id, .. } => {
                AppError::new(StatusCode::BAD_REQUEST, "duplicate_upc", message)
                    .with("existingId", Value::String(existing_id))
            }
            CatalogError::Validation { violations } => {
                AppError::new(StatusCode::BAD_REQUEST, "validation_error", message)
                    .with("violations", json!(violations))
            }
            CatalogError::InvalidPayload(_) => {
                AppError::new(StatusCode::BAD_REQUEST, "bad_request", message)
            }
            CatalogError::NotFound { id, .. } => {
                AppError::new(StatusCode::NOT_FOUND, "not_found", message)
                    .with("id", Value::String(id))
            }
            CatalogError::GroupNotFound { id } => {
                AppError::new(StatusCode::NOT_FOUND, "group_not_found", message)
                    .with("id", Value::String(id))
            }
            CatalogError::Store(_) => AppError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "internal server error",
            ),
        }
    }
}

/// Decodes a JSON request body into the operation's input type.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::from(CatalogError::from(e)))
}

fn created(message: String, id_key: &str, id: String) -> (StatusCode, Json<Value>) {
    let mut body = Map::new();
    body.insert("message".to_string(), Value::String(message));
    body.insert(id_key.to_string(), Value::String(id));
    (StatusCode::CREATED, Json(Value::Object(body)))
}

fn updated(message: String, id_key: &str, id: String) -> (StatusCode, Json<Value>) {
    let (_, body) = created(message, id_key, id);
    (StatusCode::OK, body)
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn handle_fallback() -> AppError {
    AppError::new(StatusCode::NOT_FOUND, "not_found", "no such route")
}

// ============ Groups ============

async fn handle_create_group<K: PartKind>(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let input: GroupInput = parse_body(&body)?;
    let group_id = state.catalog.create_group::<K>(input).await?;
    tracing::info!(category = K::CATEGORY.slug(), %group_id, "group created");
    Ok(created(
        format!("AR-15 {} group added successfully", K::CATEGORY.label()),
        "groupId",
        group_id,
    ))
}

async fn handle_list_groups<K: PartKind>(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupSummary>>, AppError> {
    Ok(Json(state.catalog.list_groups::<K>().await?))
}

async fn handle_get_group<K: PartKind>(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupSummary>, AppError> {
    Ok(Json(state.catalog.get_group::<K>(&group_id).await?))
}

async fn handle_update_group<K: PartKind>(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let input: GroupInput = parse_body(&body)?;
    state.catalog.update_group::<K>(&group_id, input).await?;
    tracing::info!(category = K::CATEGORY.slug(), %group_id, "group updated");
    Ok(updated(
        format!("AR-15 {} group updated successfully", K::CATEGORY.label()),
        "groupId",
        group_id,
    ))
}

// ============ Variants ============

async fn handle_create_variant<K: PartKind>(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let input: VariantInput<K> = parse_body(&body)?;
    let variant_id = state.catalog.create_variant::<K>(&group_id, input).await?;
    tracing::info!(category = K::CATEGORY.slug(), %group_id, %variant_id, "variant created");
    Ok(created(
        format!("AR-15 {} variant added successfully", K::CATEGORY.label()),
        "variantId",
        variant_id,
    ))
}

async fn handle_list_variants<K: PartKind>(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<VariantSummary<K>>>, AppError> {
    Ok(Json(state.catalog.list_variants::<K>(&group_id).await?))
}

async fn handle_get_variant<K: PartKind>(
    State(state): State<AppState>,
    Path(variant_id): Path<String>,
) -> Result<Json<VariantSummary<K>>, AppError> {
    Ok(Json(state.catalog.get_variant::<K>(&variant_id).await?))
}

async fn handle_update_variant<K: PartKind>(
    State(state): State<AppState>,
    Path(variant_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let input: VariantInput<K> = parse_body(&body)?;
    state.catalog.update_variant::<K>(&variant_id, input).await?;
    tracing::info!(category = K::CATEGORY.slug(), %variant_id, "variant updated");
    Ok(updated(
        format!("AR-15 {} variant updated successfully", K::CATEGORY.label()),
        "variantId",
        variant_id,
    ))
}

// ============ GET /enums ============

/// Registry schema version, sent alongside the `{set: [values]}` body.
pub const REGISTRY_VERSION_HEADER: &str = "x-registry-version";

async fn handle_enums<K: PartKind>(
    State(state): State<AppState>,
) -> ([(&'static str, String); 1], Json<&'static Registry>) {
    let registry = state.catalog.enums::<K>();
    (
        [(REGISTRY_VERSION_HEADER, registry.version.to_string())],
        Json(registry),
    )
}
