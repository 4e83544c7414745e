use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::AppError;
use crate::middleware::auth::AuthUser;

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

fn check_role(req: &Request, role: &str) -> Result<(), AppError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::Forbidden("Authentication required".into()))?;

    if !user.has_role(role) {
        return Err(AppError::Forbidden(format!(
            "{} lacks {}",
            user.email, role
        )));
    }
    Ok(())
}

/// Middleware: requires ROLE_USER. Must run after `authenticate`.
pub async fn require_user(req: Request, next: Next) -> Result<Response, AppError> {
    check_role(&req, ROLE_USER)?;
    Ok(next.run(req).await)
}

/// Middleware: requires ROLE_ADMIN. Must run after `authenticate`.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    check_role(&req, ROLE_ADMIN)?;
    Ok(next.run(req).await)
}
