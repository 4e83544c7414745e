//! REST API over six independent campus record types, each exposed through
//! the same role-gated list/get/create/update/delete controller.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware as axum_mw,
    routing::get,
    Router,
};
use sqlx::{Encode, PgPool, Postgres, Type};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;

use config::{Config, StorageBackend};
use error::AppResult;
use models::{
    Article, DiningCommonsMenuItem, HelpRequest, MenuItemReview, Organization,
    RecommendationRequest,
};
use repository::{MemoryRepository, PgEntity, PgRepository, Repo};
use routes::crud::entity_router;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Present only for the PostgreSQL backend.
    pub db: Option<PgPool>,
    pub help_requests: Repo<HelpRequest>,
    pub recommendation_requests: Repo<RecommendationRequest>,
    pub menu_item_reviews: Repo<MenuItemReview>,
    pub articles: Repo<Article>,
    pub menu_items: Repo<DiningCommonsMenuItem>,
    pub organizations: Repo<Organization>,
}

impl AppState {
    /// Opens the storage backend the config selects.
    pub async fn connect(config: Config) -> AppResult<Self> {
        match config.storage {
            StorageBackend::Memory => Ok(Self::in_memory(config)),
            StorageBackend::Postgres => {
                let pool = db::create_pool(&config).await?;
                Self::postgres(config, pool).await
            }
        }
    }

    pub fn in_memory(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            db: None,
            help_requests: Arc::new(MemoryRepository::new()),
            recommendation_requests: Arc::new(MemoryRepository::new()),
            menu_item_reviews: Arc::new(MemoryRepository::new()),
            articles: Arc::new(MemoryRepository::new()),
            menu_items: Arc::new(MemoryRepository::new()),
            organizations: Arc::new(MemoryRepository::new()),
        }
    }

    /// Creates any missing tables, then wires one repository per table.
    pub async fn postgres(config: Config, pool: PgPool) -> AppResult<Self> {
        Ok(Self {
            config: Arc::new(config),
            help_requests: pg_repo(&pool).await?,
            recommendation_requests: pg_repo(&pool).await?,
            menu_item_reviews: pg_repo(&pool).await?,
            articles: pg_repo(&pool).await?,
            menu_items: pg_repo(&pool).await?,
            organizations: pg_repo(&pool).await?,
            db: Some(pool),
        })
    }
}

async fn pg_repo<E>(pool: &PgPool) -> AppResult<Repo<E>>
where
    E: PgEntity,
    E::Key: for<'q> Encode<'q, Postgres> + Type<Postgres>,
{
    let repo = PgRepository::<E>::new(pool.clone());
    repo.ensure_table().await?;
    Ok(Arc::new(repo))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();
    let cors = cors_layer(&config);

    let health = Router::new()
        .route("/health", get(routes::health::health))
        .with_state(state.clone());

    Router::new()
        .merge(entity_router(state.help_requests, config.clone()))
        .merge(entity_router(state.recommendation_requests, config.clone()))
        .merge(entity_router(state.menu_item_reviews, config.clone()))
        .merge(entity_router(state.articles, config.clone()))
        .merge(entity_router(state.menu_items, config.clone()))
        .merge(entity_router(state.organizations, config.clone()))
        .route(
            "/api/currentUser",
            get(routes::current_user::current_user).route_layer(
                axum_mw::from_fn_with_state(config, middleware::auth::authenticate),
            ),
        )
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
