//! Route handler that relays the list of locations from the backend.

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};

use crate::{AppState, Error, endpoints};

/// The state needed for fetching locations from the backend.
#[derive(Debug, Clone)]
pub struct LocationsState {
    /// The base URL of the backend, e.g. "http://localhost:8000".
    pub backend_url: String,
    /// The client used to reach the backend.
    pub http_client: reqwest::Client,
}

impl FromRef<AppState> for LocationsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            backend_url: state.config.backend_url.clone(),
            http_client: state.http_client.clone(),
        }
    }
}

/// The response sent to the client when the locations could not be fetched.
pub struct LocationsError;

impl IntoResponse for LocationsError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch locations" })),
        )
            .into_response()
    }
}

/// Fetch the locations from the backend and relay the JSON body unchanged.
///
/// Any failure is logged and answered with a generic 500 error. This
/// includes a non-2xx answer from the backend, even when its body is JSON.
pub async fn get_locations(State(state): State<LocationsState>) -> Response {
    match fetch_locations(&state).await {
        Ok(locations) => Json(locations).into_response(),
        Err(error) => {
            tracing::error!("Failed to fetch locations: {error}");
            error.into_response()
        }
    }
}

/// The full URL of the backend's location listing.
pub(crate) fn locations_url(backend_url: &str) -> String {
    format!(
        "{}{}",
        backend_url.trim_end_matches('/'),
        endpoints::BACKEND_LOCATIONS
    )
}

/// Request the location listing from the backend.
///
/// # Errors
///
/// Returns an [Error::LocationsFetch] if the request fails or times out, the
/// backend answers with a non-success status, or the body is not JSON.
pub(crate) async fn fetch_locations(state: &LocationsState) -> Result<Value, Error> {
    let url = locations_url(&state.backend_url);
    tracing::debug!(%url, "Fetching locations from the backend");

    let response = state
        .http_client
        .get(&url)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| Error::LocationsFetch(error.to_string()))?;

    response
        .json::<Value>()
        .await
        .map_err(|error| Error::LocationsFetch(error.to_string()))
}

#[cfg(test)]
mod locations_tests {
    use std::time::Duration;

    use axum::{
        Json, Router,
        extract::State,
        http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
        response::{IntoResponse, Response},
        routing::get,
    };
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        locations::{LocationsState, get_locations, locations_url},
        test_utils::{closed_upstream, response_json, spawn_upstream},
    };

    fn state_for(backend_url: String) -> LocationsState {
        LocationsState {
            backend_url,
            http_client: reqwest::Client::new(),
        }
    }

    fn sample_locations() -> Value {
        json!([
            { "id": 1, "name": "Nairobi", "county": "Nairobi" },
            { "id": 2, "name": "Mombasa", "county": "Mombasa", "tags": ["coast", null] }
        ])
    }

    async fn assert_fetch_failed(response: Response) {
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response_json(response).await,
            json!({ "error": "Failed to fetch locations" })
        );
    }

    #[test]
    fn locations_url_trims_trailing_slashes() {
        assert_eq!(
            locations_url("http://backend:8000/"),
            "http://backend:8000/api/locations/v1/"
        );
        assert_eq!(
            locations_url("http://backend:8000"),
            "http://backend:8000/api/locations/v1/"
        );
    }

    #[tokio::test]
    async fn relays_upstream_json_unchanged() {
        let upstream = Router::new().route(
            endpoints::BACKEND_LOCATIONS,
            get(|| async { Json(sample_locations()) }),
        );
        let backend_url = spawn_upstream(upstream).await;

        let response = get_locations(State(state_for(backend_url))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await, sample_locations());
    }

    #[tokio::test]
    async fn sends_json_content_type_upstream() {
        let upstream = Router::new().route(
            endpoints::BACKEND_LOCATIONS,
            get(|headers: HeaderMap| async move {
                let content_type = headers
                    .get(CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned);

                Json(json!({ "contentType": content_type }))
            }),
        );
        let backend_url = spawn_upstream(upstream).await;

        let response = get_locations(State(state_for(format!("{backend_url}/")))).await;

        assert_eq!(
            response_json(response).await,
            json!({ "contentType": "application/json" })
        );
    }

    #[tokio::test]
    async fn unreachable_backend_returns_500() {
        let backend_url = closed_upstream().await;

        let response = get_locations(State(state_for(backend_url))).await;

        assert_fetch_failed(response).await;
    }

    #[tokio::test]
    async fn non_json_body_returns_500() {
        let upstream = Router::new().route(
            endpoints::BACKEND_LOCATIONS,
            get(|| async { "<html>definitely not json</html>" }),
        );
        let backend_url = spawn_upstream(upstream).await;

        let response = get_locations(State(state_for(backend_url))).await;

        assert_fetch_failed(response).await;
    }

    #[tokio::test]
    async fn upstream_error_status_returns_500_even_with_json_body() {
        let upstream = Router::new().route(
            endpoints::BACKEND_LOCATIONS,
            get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "detail": "maintenance" })),
                )
                    .into_response()
            }),
        );
        let backend_url = spawn_upstream(upstream).await;

        let response = get_locations(State(state_for(backend_url))).await;

        assert_fetch_failed(response).await;
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let upstream = Router::new().route(
            endpoints::BACKEND_LOCATIONS,
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(sample_locations())
            }),
        );
        let backend_url = spawn_upstream(upstream).await;
        let state = LocationsState {
            backend_url,
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_millis(100))
                .build()
                .unwrap(),
        };

        let response = get_locations(State(state)).await;

        assert_fetch_failed(response).await;
    }
}
