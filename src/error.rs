//! Defines the app level error type and its conversion to JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{locations::LocationsError, not_found::NotFoundError, sign_out::SignOutResponse};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An environment variable was set to a value that cannot be used.
    #[error("invalid value for {name}: {reason}")]
    InvalidConfig {
        /// The name of the environment variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The HTTP client used for talking to the backend could not be built.
    #[error("could not build the HTTP client: {0}")]
    HttpClient(String),

    /// The locations could not be fetched from the backend.
    ///
    /// The error string should only be logged for debugging on the server.
    /// Clients only ever see a generic error message.
    #[error("could not fetch locations from the backend: {0}")]
    LocationsFetch(String),

    /// The auth cookie could not be turned into a valid `Set-Cookie` header,
    /// so the client would never receive the removal.
    #[error("invalid auth cookie: {0}")]
    InvalidCookie(String),

    /// Reading from or writing to the session storage failed.
    #[error("session storage error: {0}")]
    Storage(String),

    /// A value could not be serialized to or deserialized from JSON.
    #[error("could not (de)serialize JSON: {0}")]
    Json(String),

    /// A field of a Fundi payload did not satisfy its constraints.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The wire name of the field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The certificates for serving HTTPS could not be loaded.
    #[error("could not load TLS certificates from {0}")]
    Tls(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Json(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Storage(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::LocationsFetch(_) => LocationsError.into_response(),
            Error::InvalidCookie(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SignOutResponse::failure()),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
