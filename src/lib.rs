//! FundiLink connects clients with fundis (skilled tradespeople).
//!
//! This library provides the web-facing service: a JSON API that relays
//! location listings from the backend, signs users out by deleting the auth
//! cookie, and exposes the browser-safe configuration. It also holds the
//! Fundi profile payload types and the persisted session flag used by the UI.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth_cookie;
mod config;
mod endpoints;
mod error;
pub mod fundi;
mod locations;
mod logging;
mod not_found;
mod public_config;
mod routing;
pub mod session;
mod sign_out;
mod tls;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth_cookie::{AUTH_COOKIE_NAME, AuthCookie};
pub use config::{AppConfig, CloudinaryConfig};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use public_config::PublicConfig;
pub use routing::build_router;
pub use sign_out::SignOutResponse;
pub use tls::{install_crypto_provider, load_tls_config};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the ctrl+c signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
