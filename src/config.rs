use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub tls: TlsConfig,
    #[serde(default = "default_auth_file")]
    pub auth_file: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProbeConfig {
    /// Upper bound for one probe: login plus every fetch
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Run collectors one at a time and stop at the first failure
    #[serde(default)]
    pub fail_fast: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TlsConfig {
    #[serde(default)]
    pub insecure: bool,
    /// PEM file with extra CA certificates added to the system roots
    #[serde(default)]
    pub extra_ca_cert: Option<PathBuf>,
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9747
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_auth_file() -> PathBuf {
    PathBuf::from("auth.yaml")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            fail_fast: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            probe: ProbeConfig::default(),
            tls: TlsConfig::default(),
            auth_file: default_auth_file(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SPECTRUM_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.probe.timeout_seconds == 0 {
            anyhow::bail!("probe.timeout_seconds must be greater than zero");
        }
        Ok(())
    }
}
