// API-facing error types
pub mod auth;
pub mod points;

// Re-exports for convenience
pub use auth::AuthError;
pub use points::PointsError;
