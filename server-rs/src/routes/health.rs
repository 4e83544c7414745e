use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let db_ok = match &state.db {
        Some(pool) => sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(pool)
            .await
            .is_ok(),
        // Nothing to reach when rows live in process memory.
        None => true,
    };

    let status = if db_ok { "healthy" } else { "degraded" };
    Json(json!({
        "status": status,
        "storage": state.config.storage.as_str(),
        "database": db_ok,
        "timestamp": chrono::Utc::now(),
    }))
}
