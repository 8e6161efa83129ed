//! Route handler for the part of the configuration the browser needs.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::config::{AppConfig, CloudinaryConfig};

/// Configuration that is safe to expose to the browser.
///
/// Never contains the backend URL: the browser only reaches the
/// backend through this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    /// The API URL the browser should talk to.
    pub api_url: String,
    /// The settings for unsigned image uploads.
    pub cloudinary: CloudinaryConfig,
}

impl From<&AppConfig> for PublicConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            cloudinary: config.cloudinary.clone(),
        }
    }
}

/// Return the public configuration as JSON.
pub async fn get_public_config(State(config): State<Arc<AppConfig>>) -> Json<PublicConfig> {
    Json(PublicConfig::from(config.as_ref()))
}

#[cfg(test)]
mod public_config_tests {
    use std::sync::Arc;

    use axum::extract::State;
    use serde_json::json;

    use crate::{
        config::{AppConfig, CloudinaryConfig},
        public_config::get_public_config,
    };

    #[tokio::test]
    async fn returns_public_fields_only() {
        let config = AppConfig {
            backend_url: "http://internal-backend:8000".to_owned(),
            api_url: "https://fundilink.test/api".to_owned(),
            cloudinary: CloudinaryConfig {
                cloud_name: "fundi-cloud".to_owned(),
                upload_preset: "profile-photos".to_owned(),
            },
            ..Default::default()
        };

        let body = get_public_config(State(Arc::new(config))).await;
        let body = serde_json::to_value(&body.0).unwrap();

        assert_eq!(
            body,
            json!({
                "apiUrl": "https://fundilink.test/api",
                "cloudinary": {
                    "cloudName": "fundi-cloud",
                    "uploadPreset": "profile-photos"
                }
            })
        );
        assert!(!body.to_string().contains("internal-backend"));
    }
}
