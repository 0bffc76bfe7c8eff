//! TLS adaptor construction for AMQPS connections.

use amqprs::tls::TlsAdaptor;
use celery_api_core::BrokerError;

use crate::settings::TlsSettings;

/// Build a client-authenticating TLS adaptor from PEM files.
pub(crate) fn build_adaptor(tls: &TlsSettings) -> Result<TlsAdaptor, BrokerError> {
    for (kind, path) in [
        ("CA file", &tls.ca_file),
        ("client certificate", &tls.cert_file),
        ("client key", &tls.key_file),
    ] {
        if !path.is_file() {
            return Err(BrokerError::Tls(format!(
                "{} not found at {}",
                kind,
                path.display()
            )));
        }
    }

    TlsAdaptor::with_client_auth(
        Some(tls.ca_file.as_path()),
        tls.cert_file.as_path(),
        tls.key_file.as_path(),
        tls.server_name.clone(),
    )
    .map_err(|e| BrokerError::Tls(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_ca_file() {
        let dir = TempDir::new().unwrap();
        let tls = TlsSettings {
            ca_file: dir.path().join("ca.pem"),
            cert_file: dir.path().join("cert.pem"),
            key_file: dir.path().join("key.pem"),
            server_name: "rabbit".to_string(),
        };

        let Err(err) = build_adaptor(&tls) else {
            panic!("expected TLS error");
        };
        assert!(matches!(&err, BrokerError::Tls(msg) if msg.contains("CA file")));
    }

    #[test]
    fn test_missing_key_reported_after_present_certs() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("ca.pem"), "ca").unwrap();
        std::fs::write(dir.path().join("cert.pem"), "cert").unwrap();
        let tls = TlsSettings {
            ca_file: dir.path().join("ca.pem"),
            cert_file: dir.path().join("cert.pem"),
            key_file: dir.path().join("key.pem"),
            server_name: "rabbit".to_string(),
        };

        let Err(err) = build_adaptor(&tls) else {
            panic!("expected TLS error");
        };
        assert!(matches!(&err, BrokerError::Tls(msg) if msg.contains("client key")));
    }
}
