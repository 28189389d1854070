//! Spectrum Virtualize REST Session Client
//!
//! The management API authenticates with a short-lived token:
//!
//! 1. `POST /rest/auth` with `X-Auth-Username` / `X-Auth-Password` headers
//!    returns `{"token": "..."}`.
//! 2. Every command is then a `POST /rest/<command>` carrying the token in the
//!    `X-Auth-Token` header. Reads are POSTs by API convention.
//!
//! A [`SpectrumClient`] is created per probe and dropped with it. The token is
//! never refreshed: a probe that outlives the token fails like any other fetch.
//!
//! # Example
//!
//! ```no_run
//! use secrecy::SecretString;
//! use spectrum_virtualize_exporter::spectrum::{SpectrumApi, SpectrumClient, Target};
//! use spectrum_virtualize_exporter::spectrum::types::Drive;
//!
//! # async fn example() -> spectrum_virtualize_exporter::error::Result<()> {
//! let http = reqwest::Client::new();
//! let target = Target::parse("https://svc01.example.com:7443")?;
//! let password = SecretString::from("secret");
//! let client = SpectrumClient::authenticate(&http, &target, "monitor", &password).await?;
//! let drives: Vec<Drive> = client.get("/rest/lsdrive", None).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{ExporterError, Result};
use crate::spectrum::target::Target;
use crate::spectrum::types::LoginResponse;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::debug;

pub const AUTH_PATH: &str = "/rest/auth";

pub const USERNAME_HEADER: &str = "X-Auth-Username";
pub const PASSWORD_HEADER: &str = "X-Auth-Password";
pub const TOKEN_HEADER: &str = "X-Auth-Token";

/// Read access to the Spectrum Virtualize REST commands
///
/// Collectors only depend on this trait, so they can be driven by canned
/// responses in tests.
pub trait SpectrumApi {
    /// Run a read-only command and decode its JSON response
    fn get<T>(&self, path: &str, query: Option<&str>) -> impl Future<Output = Result<T>> + Send
    where
        T: DeserializeOwned + Send;
}

/// Authenticated session against a single array
pub struct SpectrumClient {
    target: Target,
    http: reqwest::Client,
    token: SecretString,
}

impl SpectrumClient {
    /// Log in and obtain a session token
    ///
    /// Credentials travel in request headers only. Any transport error,
    /// non-200 status or response without a token is an
    /// [`ExporterError::Auth`]; nothing is retried.
    pub async fn authenticate(
        http: &reqwest::Client,
        target: &Target,
        username: &str,
        password: &SecretString,
    ) -> Result<Self> {
        let auth_error = |reason: String| ExporterError::Auth {
            target: target.to_string(),
            reason,
        };

        let url = target.endpoint(AUTH_PATH, None)?;
        debug!("Logging in to {} as {}", target, username);

        let response = http
            .post(url)
            .header(USERNAME_HEADER, username)
            .header(PASSWORD_HEADER, password.expose_secret())
            .send()
            .await
            .map_err(|e| auth_error(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(auth_error(format!(
                "Login code was {}, expected 200",
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| auth_error(e.to_string()))?;
        let login: LoginResponse = serde_json::from_slice(&body)
            .map_err(|e| auth_error(format!("Malformed login response: {}", e)))?;

        if login.token.is_empty() {
            return Err(auth_error("Login response carried no token".to_string()));
        }

        Ok(Self {
            target: target.clone(),
            http: http.clone(),
            token: SecretString::from(login.token),
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }
}

impl SpectrumApi for SpectrumClient {
    async fn get<T>(&self, path: &str, query: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let fetch_error = |reason: String| ExporterError::Fetch {
            path: path.to_string(),
            reason,
        };

        let url = self.target.endpoint(path, query)?;
        debug!("Fetching {}", url);

        let response = self
            .http
            .post(url)
            .header(TOKEN_HEADER, self.token.expose_secret())
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(fetch_error(format!(
                "Response code was {}, expected 200",
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| fetch_error(e.to_string()))
    }
}
