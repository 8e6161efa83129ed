//! Loading the certificates for serving HTTPS.

use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

use crate::Error;

/// The certificate file expected in the certificate directory.
pub const CERT_FILE_NAME: &str = "cert.pem";
/// The private key file expected in the certificate directory.
pub const KEY_FILE_NAME: &str = "key.pem";

/// Install the process-wide rustls crypto provider.
///
/// Both of rustls's crypto backends end up enabled through the dependency
/// tree, so rustls cannot pick one on its own and would panic when building
/// a server config. Calling this more than once is harmless.
pub fn install_crypto_provider() {
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("A rustls crypto provider is already installed");
    }
}

/// Load `cert.pem` and `key.pem` from `cert_dir`.
///
/// # Errors
///
/// Returns an [Error::Tls] if either file is missing or is not a valid PEM
/// certificate or private key.
pub async fn load_tls_config(cert_dir: &Path) -> Result<RustlsConfig, Error> {
    install_crypto_provider();

    RustlsConfig::from_pem_file(cert_dir.join(CERT_FILE_NAME), cert_dir.join(KEY_FILE_NAME))
        .await
        .map_err(|error| Error::Tls(format!("{}: {error}", cert_dir.display())))
}

#[cfg(test)]
mod tls_tests {
    use std::{fs, path::PathBuf};

    use crate::{
        Error,
        tls::{CERT_FILE_NAME, KEY_FILE_NAME, load_tls_config},
    };

    fn test_cert_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_data/tls")
    }

    #[tokio::test]
    async fn loads_pem_pair() {
        let config = load_tls_config(&test_cert_dir()).await;

        assert!(config.is_ok(), "got {:?}", config.err());
    }

    #[tokio::test]
    async fn loads_pem_pair_twice() {
        assert!(load_tls_config(&test_cert_dir()).await.is_ok());
        assert!(load_tls_config(&test_cert_dir()).await.is_ok());
    }

    #[tokio::test]
    async fn missing_files_are_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = load_tls_config(dir.path()).await;

        assert!(matches!(result, Err(Error::Tls(_))));
    }

    #[tokio::test]
    async fn invalid_pem_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CERT_FILE_NAME), "not a certificate").unwrap();
        fs::write(dir.path().join(KEY_FILE_NAME), "not a key").unwrap();

        let result = load_tls_config(dir.path()).await;

        assert!(matches!(result, Err(Error::Tls(_))));
    }
}
