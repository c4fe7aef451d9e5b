// API request/response objects
pub mod auth;
pub mod common;
pub mod points;
