use axum::{Router, body::Body, http::Response};
use serde_json::Value;
use tokio::net::TcpListener;

/// Read the body of `response` as JSON.
pub(crate) async fn response_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    serde_json::from_slice(&body).expect("Response body is not JSON")
}

/// Serve `router` on a random local port and return its base URL.
pub(crate) async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind stub upstream");
    let address = listener
        .local_addr()
        .expect("Could not get stub upstream address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub upstream failed");
    });

    format!("http://{address}")
}

/// A base URL on which nothing is listening.
pub(crate) async fn closed_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind placeholder listener");
    let address = listener
        .local_addr()
        .expect("Could not get placeholder address");
    drop(listener);

    format!("http://{address}")
}
