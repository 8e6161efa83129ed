//! Application configuration resolved from environment variables.

use std::{env, time::Duration};

use reqwest::Url;
use serde::Serialize;

use crate::{Error, auth_cookie::AuthCookie};

/// The environment variable holding the base URL of the backend service.
pub const BACKEND_URL: &str = "BACKEND_URL";
/// The environment variable holding the Cloudinary cloud name.
pub const CLOUDINARY_CLOUD_NAME: &str = "NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME";
/// The environment variable holding the Cloudinary unsigned upload preset.
pub const CLOUDINARY_UPLOAD_PRESET: &str = "NEXT_PUBLIC_CLOUDINARY_UPLOAD_PRESET";
/// The environment variable holding the API URL used by the browser.
pub const API_URL: &str = "NEXT_PUBLIC_API_URL";
/// The environment variable holding the backend request timeout in seconds.
pub const BACKEND_TIMEOUT_SECS: &str = "BACKEND_TIMEOUT_SECS";
/// The environment variable holding the domain the auth cookie was set for.
pub const AUTH_COOKIE_DOMAIN: &str = "AUTH_COOKIE_DOMAIN";

pub(crate) const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub(crate) const DEFAULT_CLOUDINARY_CLOUD_NAME: &str = "fundilink";
pub(crate) const DEFAULT_CLOUDINARY_UPLOAD_PRESET: &str = "fundilink_unsigned";
pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub(crate) const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the image upload provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudinaryConfig {
    /// The Cloudinary cloud to upload images to.
    pub cloud_name: String,
    /// The unsigned upload preset used by the browser.
    pub upload_preset: String,
}

/// The configuration of the application.
///
/// Built once at start-up and shared read-only with every handler through
/// [AppState](crate::AppState).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// The base URL of the backend service, without a trailing slash.
    pub backend_url: String,
    /// The API URL the browser should talk to.
    pub api_url: String,
    /// The image upload provider settings.
    pub cloudinary: CloudinaryConfig,
    /// How long to wait for the backend before giving up on a request.
    pub backend_timeout: Duration,
    /// The attributes of the auth cookie, needed to delete it.
    pub auth_cookie: AuthCookie,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            api_url: DEFAULT_API_URL.to_owned(),
            cloudinary: CloudinaryConfig {
                cloud_name: DEFAULT_CLOUDINARY_CLOUD_NAME.to_owned(),
                upload_preset: DEFAULT_CLOUDINARY_UPLOAD_PRESET.to_owned(),
            },
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
            auth_cookie: AuthCookie::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidConfig] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from `lookup`, which maps a variable name to its value.
    ///
    /// Variables that are missing or only contain whitespace fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidConfig] if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();

        let backend_url = match get(BACKEND_URL) {
            Some(url) => parse_backend_url(&url)?,
            None => defaults.backend_url,
        };

        let backend_timeout = match get(BACKEND_TIMEOUT_SECS) {
            Some(seconds) => parse_timeout(&seconds)?,
            None => defaults.backend_timeout,
        };

        let auth_cookie = AuthCookie {
            domain: get(AUTH_COOKIE_DOMAIN),
            ..defaults.auth_cookie
        };

        Ok(Self {
            backend_url,
            api_url: get(API_URL).unwrap_or(defaults.api_url),
            cloudinary: CloudinaryConfig {
                cloud_name: get(CLOUDINARY_CLOUD_NAME).unwrap_or(defaults.cloudinary.cloud_name),
                upload_preset: get(CLOUDINARY_UPLOAD_PRESET)
                    .unwrap_or(defaults.cloudinary.upload_preset),
            },
            backend_timeout,
            auth_cookie,
        })
    }
}

fn parse_backend_url(raw: &str) -> Result<String, Error> {
    let url = Url::parse(raw).map_err(|error| Error::InvalidConfig {
        name: BACKEND_URL,
        reason: error.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_owned()),
        scheme => Err(Error::InvalidConfig {
            name: BACKEND_URL,
            reason: format!("unsupported scheme \"{scheme}\", expected http or https"),
        }),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, Error> {
    match raw.parse::<u64>() {
        Ok(0) => Err(Error::InvalidConfig {
            name: BACKEND_TIMEOUT_SECS,
            reason: "the timeout must be at least one second".to_owned(),
        }),
        Ok(seconds) => Ok(Duration::from_secs(seconds)),
        Err(error) => Err(Error::InvalidConfig {
            name: BACKEND_TIMEOUT_SECS,
            reason: format!("\"{raw}\" is not a whole number of seconds: {error}"),
        }),
    }
}
