pub mod auth;
pub mod roles;

pub use auth::*;
pub use roles::*;
