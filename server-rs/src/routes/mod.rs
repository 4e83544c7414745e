pub mod crud;
pub mod current_user;
pub mod health;
