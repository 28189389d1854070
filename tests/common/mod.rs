//! Shared test helpers

#![allow(dead_code)]

use serde::de::DeserializeOwned;
use serde_json::Value;
use spectrum_virtualize_exporter::error::{ExporterError, Result};
use spectrum_virtualize_exporter::metrics::ProbeRegistry;
use spectrum_virtualize_exporter::spectrum::SpectrumApi;
use std::collections::HashMap;

/// Serves canned JSON per REST path. Unknown paths fail like an HTTP 500.
#[derive(Default)]
pub struct FakeClient {
    responses: HashMap<String, Value>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), body);
        self
    }
}

impl SpectrumApi for FakeClient {
    async fn get<T>(&self, path: &str, _query: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let body = self
            .responses
            .get(path)
            .cloned()
            .ok_or_else(|| ExporterError::Fetch {
                path: path.to_string(),
                reason: "Response code was 500, expected 200".to_string(),
            })?;
        Ok(serde_json::from_value(body)?)
    }
}

pub fn create_test_registry() -> ProbeRegistry {
    ProbeRegistry::new().expect("Failed to create registry")
}

/// Value of the first rendered sample line starting with `series`
pub fn sample(rendered: &str, series: &str) -> Option<f64> {
    rendered
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| line.strip_prefix(series))
        .and_then(|rest| rest.trim().parse().ok())
}
