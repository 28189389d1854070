//! Spectrum Virtualize Prometheus Exporter
//!
//! A multi-target Prometheus exporter for IBM Spectrum Virtualize arrays
//! (SAN Volume Controller, FlashSystem, Storwize).
//!
//! # Overview
//!
//! Prometheus scrapes `/probe?target=https://array:7443`. For every request the
//! exporter logs in to that array's REST API with the credentials registered
//! for it, runs a fixed set of read-only `ls*` commands, normalizes the records
//! into gauges and returns them in Prometheus text format.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   POST /rest/ls*    ┌──────────────┐
//! │  Spectrum   │ ◄─────────────────  │   Exporter   │
//! │ Virtualize  │   X-Auth-Token      │              │
//! └─────────────┘                     │  ┌────────┐  │   GET /probe   ┌────────────┐
//!                                     │  │ Prober │  │ ◄────────────► │ Prometheus │
//!                                     │  └────────┘  │                └────────────┘
//!                                     │  ┌────────┐  │
//!                                     │  │Collect.│  │
//!                                     │  └────────┘  │
//!                                     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`spectrum`] - REST session client, target normalization, record types
//! - [`collectors`] - One collector per resource type
//! - [`probe`] - Probe orchestration
//! - [`metrics`] - Per-probe registry and exporter self-metrics
//! - [`units`] - Byte size, port speed and integer parsing
//! - [`credentials`] - Credential map
//! - [`server`] - HTTP server
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use spectrum_virtualize_exporter::{config::Config, credentials::Credentials, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     let credentials = Credentials::load(&config.auth_file)?;
//!     server::start(config, credentials).await?;
//!     Ok(())
//! }
//! ```

pub mod collectors;
pub mod config;
pub mod credentials;
pub mod error;
pub mod metrics;
pub mod probe;
pub mod server;
pub mod spectrum;
pub mod units;
