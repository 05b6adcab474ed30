pub mod auth;
pub mod sanitize;
