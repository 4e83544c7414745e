use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::middleware::auth::AuthUser;

pub async fn current_user(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "user": { "email": user.email },
        "roles": user.roles,
    }))
}
