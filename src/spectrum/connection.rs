//! Shared HTTP Transport
//!
//! One `reqwest::Client` is built at startup and cloned into every probe, so
//! concurrent probes share its connection pool and TLS configuration. The trust
//! store is the system roots, optionally extended with extra PEM certificates;
//! verification can be switched off entirely for arrays with self-signed
//! certificates.

use crate::config::TlsConfig;
use crate::error::{ExporterError, Result};
use tracing::{info, warn};

/// Build the transport used for every call to the arrays
pub fn build_http_client(tls: &TlsConfig) -> Result<reqwest::Client> {
    // Credentials must never follow a redirect to another host
    let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());

    if let Some(path) = &tls.extra_ca_cert {
        let pem = std::fs::read(path).map_err(|e| {
            ExporterError::Config(format!(
                "Failed to read extra CA file {}: {}",
                path.display(),
                e
            ))
        })?;
        let certificates = reqwest::Certificate::from_pem_bundle(&pem)?;
        if certificates.is_empty() {
            return Err(ExporterError::Config(format!(
                "No certificates found in {}",
                path.display()
            )));
        }
        info!(
            "Adding {} extra CA certificate(s) from {}",
            certificates.len(),
            path.display()
        );
        for certificate in certificates {
            builder = builder.add_root_certificate(certificate);
        }
    }

    if tls.insecure {
        warn!("TLS certificate verification is disabled");
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_tls_builds() {
        assert!(build_http_client(&TlsConfig::default()).is_ok());
    }

    #[test]
    fn test_insecure_tls_builds() {
        let tls = TlsConfig {
            insecure: true,
            extra_ca_cert: None,
        };
        assert!(build_http_client(&tls).is_ok());
    }

    #[test]
    fn test_missing_extra_ca_is_config_error() {
        let tls = TlsConfig {
            insecure: false,
            extra_ca_cert: Some(PathBuf::from("/nonexistent/ca.pem")),
        };
        let err = build_http_client(&tls).unwrap_err();
        assert!(matches!(err, ExporterError::Config(_)));
    }
}
