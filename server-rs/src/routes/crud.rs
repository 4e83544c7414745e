//! The list/get/create/update/delete controller shared by every record type.
//!
//! Each entity gets five routes under its base path:
//!
//! | Method | Path | Role |
//! |---|---|---|
//! | GET | `{base}/all` | `ROLE_USER` |
//! | GET | `{base}?id=..` | `ROLE_USER` |
//! | POST | `{base}/post?field=..` | `ROLE_ADMIN` |
//! | PUT | `{base}?id=..` + JSON body | `ROLE_ADMIN` |
//! | DELETE | `{base}?id=..` | `ROLE_ADMIN` |

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    middleware as axum_mw,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::authenticate;
use crate::middleware::roles::{require_admin, require_user};
use crate::repository::{Entity, Repo};

/// An entity exposed over the REST surface.
pub trait RestEntity: Entity {
    const BASE_PATH: &'static str;
    /// Query parameter carrying the key on get/update/delete.
    const KEY_PARAM: &'static str = "id";

    /// One field per query parameter of the create endpoint.
    type CreateParams: DeserializeOwned + Send + 'static;

    fn from_params(params: Self::CreateParams) -> Self;

    /// Record-level checks run before every save.
    fn validate(&self) -> AppResult<()> {
        Ok(())
    }
}

fn key_from_query<E: RestEntity>(params: &HashMap<String, String>) -> AppResult<E::Key> {
    let raw = params.get(E::KEY_PARAM).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Required request parameter '{}' is not present",
            E::KEY_PARAM
        ))
    })?;
    raw.trim().parse().map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid value '{}' for parameter '{}'",
            raw,
            E::KEY_PARAM
        ))
    })
}

async fn find_or_404<E: RestEntity>(repo: &Repo<E>, key: &E::Key) -> AppResult<E> {
    repo.find_by_id(key)
        .await?
        .ok_or_else(|| AppError::not_found(E::NAME, key))
}

pub async fn list<E: RestEntity>(State(repo): State<Repo<E>>) -> AppResult<Json<Vec<E>>> {
    let rows = repo.find_all().await?;
    Ok(Json(rows))
}

pub async fn get_one<E: RestEntity>(
    State(repo): State<Repo<E>>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<E>> {
    let key = key_from_query::<E>(&params)?;
    let row = find_or_404(&repo, &key).await?;
    Ok(Json(row))
}

pub async fn create<E: RestEntity>(
    State(repo): State<Repo<E>>,
    params: Result<Query<E::CreateParams>, QueryRejection>,
) -> AppResult<Json<E>> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let entity = E::from_params(params);
    entity.validate()?;

    let saved = repo.save(entity).await?;
    if let Some(key) = saved.key() {
        tracing::info!(entity = E::NAME, %key, "created");
    }
    Ok(Json(saved))
}

pub async fn update<E: RestEntity>(
    State(repo): State<Repo<E>>,
    Query(params): Query<HashMap<String, String>>,
    body: Result<Json<E>, JsonRejection>,
) -> AppResult<Json<E>> {
    let key = key_from_query::<E>(&params)?;
    let Json(incoming) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    find_or_404(&repo, &key).await?;

    // Every field comes from the payload; only the key survives.
    let replacement = incoming.with_key(key.clone());
    replacement.validate()?;

    let saved = repo.save(replacement).await?;
    tracing::info!(entity = E::NAME, %key, "updated");
    Ok(Json(saved))
}

pub async fn remove<E: RestEntity>(
    State(repo): State<Repo<E>>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Value>> {
    let key = key_from_query::<E>(&params)?;
    find_or_404(&repo, &key).await?;

    repo.delete(&key).await?;
    tracing::info!(entity = E::NAME, %key, "deleted");
    Ok(Json(json!({
        "message": format!("{} with id {} deleted", E::NAME, key)
    })))
}

/// Routes for one entity. Every route authenticates first, then checks
/// the role the route requires.
pub fn entity_router<E: RestEntity>(repo: Repo<E>, config: Arc<Config>) -> Router {
    let base = E::BASE_PATH;

    let by_key = get(get_one::<E>)
        .route_layer(axum_mw::from_fn(require_user))
        .merge(
            put(update::<E>)
                .merge(delete(remove::<E>))
                .route_layer(axum_mw::from_fn(require_admin)),
        );

    Router::new()
        .route(
            &format!("{base}/all"),
            get(list::<E>).route_layer(axum_mw::from_fn(require_user)),
        )
        .route(
            &format!("{base}/post"),
            post(create::<E>).route_layer(axum_mw::from_fn(require_admin)),
        )
        .route(base, by_key)
        .route_layer(axum_mw::from_fn_with_state(config, authenticate))
        .with_state(repo)
}
