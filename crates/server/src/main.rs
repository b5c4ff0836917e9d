use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    routing::{get, put},
    Json, Router,
};
use server_api::{create_book, delete_book, list_books, seed_catalog, update_book, ApiContext};
use shared::{
    domain::{Book, BookFields, BookId},
    error::{ApiError, ErrorCode},
    protocol::{BookQuery, CreatedBookResponse, MessageResponse, BOOKS_ROUTE},
};
use storage::Storage;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, prepare_database_url};

const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

type HttpResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    let api = ApiContext { storage };

    if settings.seed_on_startup {
        seed_catalog(&api).await?;
    }

    let state = AppState { api };
    let app = build_router(Arc::new(state), &settings.allowed_origins);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for ctrl-c; shutting down");
    }
    info!("shutdown requested");
}

fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(BOOKS_ROUTE, get(http_list_books).post(http_create_book))
        .route(
            &format!("{BOOKS_ROUTE}/:book_id"),
            put(http_update_book).delete(http_delete_book),
        )
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<&'static str, StatusCode> {
    state.api.storage.health_check().await.map_err(|error| {
        error!(%error, "health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok("ok")
}

async fn http_list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookQuery>,
) -> HttpResult<Vec<Book>> {
    let books = list_books(&state.api, query).await.map_err(error_response)?;
    Ok(Json(books))
}

async fn http_create_book(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<BookFields>,
) -> HttpResult<CreatedBookResponse> {
    let created = create_book(&state.api, fields)
        .await
        .map_err(error_response)?;
    Ok(Json(created))
}

async fn http_update_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    Json(fields): Json<BookFields>,
) -> HttpResult<MessageResponse> {
    let response = update_book(&state.api, &BookId::new(book_id), fields)
        .await
        .map_err(error_response)?;
    Ok(Json(response))
}

async fn http_delete_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> HttpResult<MessageResponse> {
    let response = delete_book(&state.api, &BookId::new(book_id))
        .await
        .map_err(error_response)?;
    Ok(Json(response))
}

fn error_response(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Internal => {
            error!(message = %err.message, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
