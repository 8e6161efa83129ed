//! Sign-out route handler that deletes the auth cookie.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth_cookie::{AuthCookie, remove_auth_cookie};

const SIGNED_OUT_MESSAGE: &str = "You have been signed out successfully";
const SIGN_OUT_FAILED_MESSAGE: &str = "Failed to sign out";

/// The JSON body returned by the sign-out endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOutResponse {
    /// Whether the auth cookie was deleted.
    pub success: bool,
    /// A message that can be shown to the user.
    pub message: String,
}

impl SignOutResponse {
    pub(crate) fn success() -> Self {
        Self {
            success: true,
            message: SIGNED_OUT_MESSAGE.to_owned(),
        }
    }

    pub(crate) fn failure() -> Self {
        Self {
            success: false,
            message: SIGN_OUT_FAILED_MESSAGE.to_owned(),
        }
    }
}

/// Delete the auth cookie and confirm the sign-out.
///
/// The cookie is removed whether or not the request carried it. No
/// server-side session is invalidated.
pub async fn post_sign_out(State(auth_cookie): State<AuthCookie>, jar: CookieJar) -> Response {
    match remove_auth_cookie(jar, &auth_cookie) {
        Ok(jar) => (jar, Json(SignOutResponse::success())).into_response(),
        Err(error) => {
            tracing::error!("Failed to sign out: {error}");
            error.into_response()
        }
    }
}
