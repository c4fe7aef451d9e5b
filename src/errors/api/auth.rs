use crate::errors::internal::{ErrorKind, InternalError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid email or password, or an unusable session token
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Email already registered
    #[oai(status = 409)]
    UserExists(Json<ErrorResponse>),

    /// Token subject no longer has an account
    #[oai(status = 404)]
    UserNotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse::new(
            "invalid_credentials",
            "Invalid email or password",
            401,
        )))
    }

    /// Create a UserExists error
    pub fn user_exists() -> Self {
        AuthError::UserExists(Json(ErrorResponse::new(
            "user_exists",
            "User already exists",
            409,
        )))
    }

    /// Create a UserNotFound error
    pub fn user_not_found() -> Self {
        AuthError::UserNotFound(Json(ErrorResponse::new(
            "user_not_found",
            "User not found",
            404,
        )))
    }

    fn internal_server_error() -> Self {
        AuthError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    /// Convert InternalError to AuthError
    ///
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match err.kind() {
            ErrorKind::InvalidCredentials => {
                tracing::debug!("Authentication rejected: {}", err);
                Self::invalid_credentials()
            }
            // A concurrent registration can lose the race at the unique index
            ErrorKind::UserExists | ErrorKind::Conflict => {
                tracing::debug!("Registration rejected: {}", err);
                Self::user_exists()
            }
            ErrorKind::UserNotFound => Self::user_not_found(),
            _ => {
                tracing::error!("Unexpected error in auth operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(json)
            | AuthError::UserExists(json)
            | AuthError::UserNotFound(json)
            | AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
