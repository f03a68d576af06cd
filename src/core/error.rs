use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::borrow::Cow;

/// Failure envelope. `data` is always an empty array so clients can rely on it being present.
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    data: Vec<serde_json::Value>,
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: Cow<'static, str>,
    details: Option<String>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    // Common error constructors
    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_server_error(message: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn service_unavailable(message: &'static str) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

/// True when the error means the store could not be reached at all,
/// as opposed to a query that reached MySQL and failed there.
pub fn store_unavailable(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if store_unavailable(&err) {
            return Self::service_unavailable("Database unavailable");
        }
        match err {
            sqlx::Error::RowNotFound => Self::not_found("Resource not found"),
            _ => Self::internal_server_error("Service temporarily unavailable"),
        }
    }
}

/// First field message in field-name order, so the same body always
/// reports the same failure.
fn first_field_message(err: &validator::ValidationErrors) -> Option<Cow<'static, str>> {
    let mut fields: Vec<_> = err
        .field_errors()
        .into_iter()
        .map(|(field, errors)| (field.to_string(), errors))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errors)| errors.iter())
        .find_map(|error| error.message.clone())
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let message = first_field_message(&err).unwrap_or(Cow::Borrowed("Validation error"));
        Self::new(StatusCode::BAD_REQUEST, message).with_details(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        Self::bad_request("Invalid JSON input").with_details(err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorResponse {
            success: false,
            message: self.message,
            error: self.details,
            data: Vec::new(),
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_maps_to_service_unavailable() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(store_unavailable(&sqlx::Error::PoolClosed));
    }

    #[test]
    fn query_failures_are_not_unavailability() {
        assert!(!store_unavailable(&sqlx::Error::RowNotFound));
        let err = AppError::from(sqlx::Error::ColumnNotFound("quantity".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_surface_the_field_message() {
        let mut errors = validator::ValidationErrors::new();
        let mut units = validator::ValidationError::new("range");
        units.message = Some("Units cannot be negative".into());
        errors.add("units", units);
        let mut blood_type = validator::ValidationError::new("blood_type");
        blood_type.message = Some("Invalid blood type".into());
        errors.add("blood_type", blood_type);

        let err = AppError::from(errors);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid blood type");
    }

    #[test]
    fn validation_errors_without_message_fall_back() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("units", validator::ValidationError::new("range"));

        let err = AppError::from(errors);
        assert_eq!(err.message, "Validation error");
    }
}
