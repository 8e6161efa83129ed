//! Functions for deleting the auth cookie that marks a user as signed in.
//!
//! The cookie itself is issued by the backend at log-in. This service only
//! ever removes it.

use axum::http::HeaderValue;
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::Error;

/// The name of the cookie holding the auth token.
pub const AUTH_COOKIE_NAME: &str = "fundilink_token";

/// The attributes identifying the auth cookie in the browser.
///
/// A browser only deletes a cookie when the name, path and domain of the
/// removal match the ones the cookie was set with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCookie {
    /// The cookie name.
    pub name: String,
    /// The path the cookie was set for.
    pub path: String,
    /// The domain the cookie was set for, `None` for a host-only cookie.
    pub domain: Option<String>,
}

impl Default for AuthCookie {
    fn default() -> Self {
        Self {
            name: AUTH_COOKIE_NAME.to_owned(),
            path: "/".to_owned(),
            domain: None,
        }
    }
}

impl AuthCookie {
    /// Build a cookie that tells the browser to delete the auth cookie.
    ///
    /// The cookie has an empty value, a max age of zero and expires at the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidCookie] if the cookie attributes cannot be sent in a
    /// `Set-Cookie` header. The cookie jar drops such cookies without reporting it.
    pub fn removal(&self) -> Result<Cookie<'static>, Error> {
        validate_name(&self.name)?;
        validate_attribute("path", &self.path)?;

        if let Some(domain) = &self.domain {
            validate_attribute("domain", domain)?;
        }

        let mut builder = Cookie::build((self.name.clone(), ""))
            .path(self.path.clone())
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Lax);

        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }

        let cookie = builder.build();

        HeaderValue::from_str(&cookie.to_string())
            .map_err(|error| Error::InvalidCookie(error.to_string()))?;

        Ok(cookie)
    }
}

/// Add the removal of the auth cookie to `jar`.
///
/// The removal is added whether or not the request carried the cookie.
///
/// # Errors
///
/// Returns an [Error::InvalidCookie] if the removal cookie cannot be built,
/// see [AuthCookie::removal].
pub fn remove_auth_cookie(jar: CookieJar, auth_cookie: &AuthCookie) -> Result<CookieJar, Error> {
    Ok(jar.add(auth_cookie.removal()?))
}

/// Cookie names must be an RFC 6265 token: visible ASCII without separators.
fn validate_name(name: &str) -> Result<(), Error> {
    const SEPARATORS: &str = "()<>@,;:\\\"/[]?={}";

    if name.is_empty() {
        return Err(Error::InvalidCookie("the cookie name is empty".to_owned()));
    }

    match name
        .chars()
        .find(|c| !c.is_ascii_graphic() || SEPARATORS.contains(*c))
    {
        Some(c) => Err(Error::InvalidCookie(format!(
            "the cookie name {name:?} contains the character {c:?}"
        ))),
        None => Ok(()),
    }
}

fn validate_attribute(attribute: &str, value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::InvalidCookie(format!("the cookie {attribute} is empty")));
    }

    match value.chars().find(|c| c.is_control() || *c == ';') {
        Some(c) => Err(Error::InvalidCookie(format!(
            "the cookie {attribute} {value:?} contains the character {c:?}"
        ))),
        None => Ok(()),
    }
}
