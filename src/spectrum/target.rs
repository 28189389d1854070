//! Probe Target Normalization
//!
//! A probe request names its array with an arbitrary absolute URL. Only the
//! scheme and the `host[:port]` authority survive normalization: they select the
//! credentials and form the base of every REST call, so a caller cannot steer
//! requests to another path or smuggle query parameters upstream.

use crate::error::{ExporterError, Result};
use std::fmt;
use url::Url;

/// A Spectrum Virtualize management endpoint reduced to scheme and authority
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    scheme: String,
    authority: String,
}

impl Target {
    /// Parse and normalize a raw `target` parameter.
    ///
    /// Fails for unparseable URLs, schemes other than `http`/`https` and URLs
    /// without a host.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw)
            .map_err(|e| ExporterError::InvalidTarget(format!("{raw:?}: {e}")))?;

        let scheme = url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(ExporterError::InvalidTarget(format!(
                "Unsupported scheme {scheme:?}"
            )));
        }

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ExporterError::InvalidTarget(format!("{raw:?} has no host")))?;

        // `Url::port` omits the scheme's default port
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self {
            scheme: scheme.to_string(),
            authority,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Build the full URL for a REST path on this target
    pub fn endpoint(&self, path: &str, query: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.to_string())
            .map_err(|e| ExporterError::InvalidTarget(format!("{self}: {e}")))?;
        url.set_path(path);
        url.set_query(query.filter(|q| !q.is_empty()));
        Ok(url)
    }
}

impl fmt::Display for Target {
    /// The `scheme://host[:port]` form used as the credential map key
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)
    }
}
