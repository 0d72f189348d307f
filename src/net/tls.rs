//! TLS configuration and certificate loading.

use std::io;
use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

/// Load the listener certificate and private key from PEM files.
///
/// Existence of both files is checked by config validation; this only turns
/// the material into a server config.
pub async fn load_tls_config(cert_path: &Path, key_path: &Path) -> io::Result<RustlsConfig> {
    RustlsConfig::from_pem_file(cert_path, key_path).await
}
