//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{Error, auth_cookie::AuthCookie, config::AppConfig};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The configuration resolved at start-up.
    pub config: Arc<AppConfig>,

    /// The client for requests to the backend, shared so connections are pooled.
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Create a new [AppState] from `config`.
    ///
    /// Requests made with the HTTP client time out after `config.backend_timeout`.
    ///
    /// # Errors
    /// Returns an [Error::HttpClient] if the HTTP client cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .build()
            .map_err(|error| Error::HttpClient(error.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for AuthCookie {
    fn from_ref(state: &AppState) -> Self {
        state.config.auth_cookie.clone()
    }
}
