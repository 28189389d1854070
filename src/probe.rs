//! Probe Orchestration
//!
//! One probe turns a `target` parameter into a populated [`ProbeRegistry`]:
//!
//! 1. Resolve credentials for the normalized target (no network on a miss)
//! 2. Log in to obtain a session token
//! 3. Run every collector against the session
//! 4. Report overall success and wall-clock duration
//!
//! The whole sequence is bounded by one deadline. When it fires, outstanding
//! requests are dropped and the probe fails; series registered before that
//! point stay in the registry and are still exposed.
//!
//! # Collector Scheduling
//!
//! By default every collector runs, concurrently on the probe's task, and the
//! probe succeeds only if all of them did. With `fail_fast` the collectors run
//! one at a time in [`Collector::ALL`] order and the probe stops at the first
//! failure, so later resource types are absent from the output. Either way
//! `spectrum_probe_collector_success` shows which collectors ran and how they
//! fared.

use crate::collectors::{CollectionContext, Collector};
use crate::config::ProbeConfig;
use crate::credentials::Credentials;
use crate::error::{ExporterError, Result};
use crate::metrics::{set_bool, ProbeRegistry};
use crate::spectrum::{SpectrumApi, SpectrumClient, Target};
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Result of one probe invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeOutcome {
    pub success: bool,
    pub duration: Duration,
}

/// Runs probes against any configured array
///
/// Holds only state shared read-only between concurrent probes: the HTTP
/// transport and the credential map.
#[derive(Clone)]
pub struct Prober {
    http: reqwest::Client,
    credentials: Arc<Credentials>,
    config: ProbeConfig,
}

impl Prober {
    pub fn new(http: reqwest::Client, credentials: Arc<Credentials>, config: ProbeConfig) -> Self {
        Self {
            http,
            credentials,
            config,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Probe one target, filling `registry`
    ///
    /// Credential, login, fetch and timeout failures are logged and reported as
    /// an unsuccessful outcome. `Err` is returned only for metric registration
    /// errors, which indicate a bug rather than a problem with the array.
    pub async fn probe(&self, target: &Target, registry: &ProbeRegistry) -> Result<ProbeOutcome> {
        let start = Instant::now();
        let timeout = self.config.timeout();

        let success = match tokio::time::timeout(timeout, self.run(target, registry)).await {
            Ok(Ok(success)) => success,
            Ok(Err(e @ ExporterError::Metrics(_))) => return Err(e),
            Ok(Err(e)) => {
                warn!("Probe of {} failed: {}", target, e);
                false
            }
            Err(_) => {
                warn!(
                    "Probe of {} failed: {}",
                    target,
                    ExporterError::Timeout(timeout.as_secs_f64())
                );
                false
            }
        };

        Ok(ProbeOutcome {
            success,
            duration: start.elapsed(),
        })
    }

    async fn run(&self, target: &Target, registry: &ProbeRegistry) -> Result<bool> {
        let (username, password) = self.credentials.lookup(target)?;
        let client = SpectrumClient::authenticate(&self.http, target, username, password).await?;
        run_collectors(&client, registry, self.config.fail_fast).await
    }
}

/// Run every collector against an authenticated session
///
/// Returns whether all collectors that ran succeeded.
pub async fn run_collectors<C: SpectrumApi>(
    client: &C,
    registry: &ProbeRegistry,
    fail_fast: bool,
) -> Result<bool> {
    let collector_success = registry.gauge_vec(
        "spectrum_probe_collector_success",
        "Whether the collector for a resource type succeeded",
        &["collector"],
    )?;
    let ctx = CollectionContext {
        client,
        metrics: registry,
    };

    if fail_fast {
        for collector in Collector::ALL {
            let succeeded = collector.collect(&ctx).await?.is_success();
            set_bool(&collector_success, &[collector.name()], succeeded);
            if !succeeded {
                debug!("Stopping probe after {} failed", collector.name());
                return Ok(false);
            }
        }
        return Ok(true);
    }

    let results = join_all(Collector::ALL.iter().map(|collector| collector.collect(&ctx))).await;

    let mut success = true;
    for (collector, result) in Collector::ALL.iter().zip(results) {
        let succeeded = result?.is_success();
        set_bool(&collector_success, &[collector.name()], succeeded);
        success &= succeeded;
    }
    Ok(success)
}
