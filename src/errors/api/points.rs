use crate::errors::internal::{ErrorKind, InternalError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Errors returned by the points endpoints
#[derive(ApiResponse, Debug)]
pub enum PointsError {
    /// Missing, malformed or expired session token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Sender or recipient could not be resolved
    #[oai(status = 404)]
    UserNotFound(Json<ErrorResponse>),

    /// Transfer amount is zero or negative
    #[oai(status = 400)]
    InvalidAmount(Json<ErrorResponse>),

    /// Sender balance is below the requested amount
    #[oai(status = 422)]
    InsufficientPoints(Json<ErrorResponse>),

    /// Member code already taken
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl PointsError {
    pub fn unauthorized() -> Self {
        PointsError::Unauthorized(Json(ErrorResponse::new(
            "unauthorized",
            "Invalid or expired session token",
            401,
        )))
    }

    pub fn user_not_found() -> Self {
        PointsError::UserNotFound(Json(ErrorResponse::new(
            "user_not_found",
            "User not found",
            404,
        )))
    }

    pub fn invalid_amount() -> Self {
        PointsError::InvalidAmount(Json(ErrorResponse::new(
            "invalid_amount",
            "Amount must be a positive integer",
            400,
        )))
    }

    pub fn insufficient_points() -> Self {
        PointsError::InsufficientPoints(Json(ErrorResponse::new(
            "insufficient_points",
            "Insufficient points",
            422,
        )))
    }

    pub fn conflict() -> Self {
        PointsError::Conflict(Json(ErrorResponse::new(
            "conflict",
            "Resource already exists",
            409,
        )))
    }

    fn internal_server_error() -> Self {
        PointsError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    /// Convert InternalError to PointsError without exposing storage details
    pub fn from_internal_error(err: InternalError) -> Self {
        match err.kind() {
            ErrorKind::InvalidCredentials => Self::unauthorized(),
            ErrorKind::UserNotFound => Self::user_not_found(),
            ErrorKind::InvalidAmount => Self::invalid_amount(),
            ErrorKind::InsufficientPoints => Self::insufficient_points(),
            ErrorKind::Conflict | ErrorKind::UserExists => Self::conflict(),
            ErrorKind::StorageError => {
                tracing::error!("Unexpected error in points operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            PointsError::Unauthorized(json)
            | PointsError::UserNotFound(json)
            | PointsError::InvalidAmount(json)
            | PointsError::InsufficientPoints(json)
            | PointsError::Conflict(json)
            | PointsError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<InternalError> for PointsError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for PointsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
