use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod ai;
pub mod compression;
pub mod gallery;
pub mod handlers;
pub mod location;
pub mod photo;
pub mod remote;
pub mod storage;
pub mod wall;

use ai::AiConfig;
use location::LocationConfig;
use remote::RemoteConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub location: Option<LocationConfig>,
    #[serde(default)]
    pub development: DevelopmentConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub directory: PathBuf,
    /// Total bytes the saved records may occupy.
    #[serde(default = "default_capacity_bytes")]
    pub capacity_bytes: usize,
    /// Prints whose payload exceeds this are compressed before saving.
    #[serde(default = "default_compress_threshold_bytes")]
    pub compress_threshold_bytes: usize,
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    #[serde(default = "default_quality")]
    pub quality: u8,
}

fn default_capacity_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_compress_threshold_bytes() -> usize {
    500_000
}

fn default_max_dimension() -> u32 {
    800
}

fn default_quality() -> u8 {
    70
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            capacity_bytes: default_capacity_bytes(),
            compress_threshold_bytes: default_compress_threshold_bytes(),
            max_dimension: default_max_dimension(),
            quality: default_quality(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DevelopmentConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Progress added to every undeveloped print per tick.
    #[serde(default = "default_increment")]
    pub increment: f64,
    /// Progress added by one shake.
    #[serde(default = "default_shake_boost")]
    pub shake_boost: f64,
}

fn default_tick_ms() -> u64 {
    200
}

fn default_increment() -> f64 {
    1.0
}

fn default_shake_boost() -> f64 {
    8.0
}

impl Default for DevelopmentConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            increment: default_increment(),
            shake_boost: default_shake_boost(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            app: AppConfig {
                name: "Polaroid Wall".to_string(),
                log_level: "info".to_string(),
            },
            storage: StorageConfig::default(),
            remote: RemoteConfig::default(),
            ai: AiConfig::default(),
            location: None,
            development: DevelopmentConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Remote gallery setup failed: {0}")]
    Remote(#[from] remote::RemoteError),

    #[error("AI provider setup failed: {0}")]
    Ai(#[from] ai::AiError),
}

/// Wire the wall together from configuration.
pub fn create_wall(config: &Config) -> Result<wall::SharedWall, SetupError> {
    let store = storage::PhotoStore::from_config(storage::create_store(&config.storage), &config.storage);

    let backend = remote::create_backend(&config.remote.provider)?;
    let remote = remote::RemoteGalleryClient::new(
        backend,
        store.clone(),
        compression::CompressionSettings::new(
            config.remote.upload_max_dimension,
            config.remote.upload_quality,
        ),
    );
    let gallery = gallery::GalleryEngine::new(remote, store.clone(), config.remote.fetch_limit);

    let (captioner, restyler) = ai::create_providers(&config.ai)?;

    Ok(Arc::new(wall::PhotoWall::new(
        store,
        gallery,
        captioner,
        restyler,
        config.development.clone(),
    )))
}

use axum::Router;
use axum::routing::{get, post, put};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub wall: wall::SharedWall,
    pub config: Config,
}

pub fn create_app(wall: wall::SharedWall, config: Config) -> Router {
    let app_state = AppState { wall, config };

    Router::new()
        .route(
            "/api/photos",
            get(handlers::list_photos_handler).post(handlers::capture_handler),
        )
        .route(
            "/api/photos/{id}",
            axum::routing::delete(handlers::delete_photo_handler),
        )
        .route(
            "/api/photos/{id}/position",
            put(handlers::update_position_handler),
        )
        .route(
            "/api/photos/{id}/progress",
            put(handlers::update_progress_handler),
        )
        .route("/api/photos/{id}/shake", post(handlers::shake_handler))
        .route("/api/photos/{id}/style", post(handlers::edit_style_handler))
        .route("/api/photos/{id}/share", post(handlers::toggle_share_handler))
        .route("/api/gallery", get(handlers::gallery_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let method = request.method();
                    let uri = request.uri();
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::info_span!(
                        "http_request",
                        method = %method,
                        uri = %uri,
                        matched_path,
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    let user_agent = request
                        .headers()
                        .get("user-agent")
                        .and_then(|h| h.to_str().ok())
                        .unwrap_or("-");

                    tracing::info!(
                        target: "access_log",
                        method = %request.method(),
                        path = %request.uri().path(),
                        user_agent = %user_agent,
                        "request"
                    );
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::info!(
                            target: "access_log",
                            status = %response.status(),
                            latency_ms = %latency.as_millis(),
                            "response"
                        );
                    },
                ),
        )
        .with_state(app_state)
}
