//! Credential Map
//!
//! Maps the normalized `scheme://host[:port]` form of a target to the user and
//! password used to log in to it. The map is read from a YAML file once at
//! startup and is immutable afterwards, so concurrent probes read it without
//! locking:
//!
//! ```yaml
//! "https://svc01.example.com:7443":
//!   user: monitor
//!   password: secret
//! ```

use crate::error::{ExporterError, Result};
use crate::spectrum::Target;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Auth {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: Option<SecretString>,
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    entries: HashMap<String, Auth>,
}

impl Credentials {
    /// Build the map, keying every entry by its normalized target
    ///
    /// Keys go through [`Target::parse`] so that they compare equal to the
    /// targets of probe requests (`https://SVC01:443` is stored as
    /// `https://svc01`). A key that is not a valid target, or two keys naming
    /// the same target, fail with [`ExporterError::Config`].
    pub fn new(entries: HashMap<String, Auth>) -> Result<Self> {
        let mut normalized = HashMap::with_capacity(entries.len());
        for (raw, auth) in entries {
            let key = Target::parse(&raw)
                .map_err(|e| ExporterError::Config(format!("Credential entry {raw:?}: {e}")))?
                .to_string();
            if normalized.contains_key(&key) {
                return Err(ExporterError::Config(format!(
                    "Credential entry {raw:?} duplicates another entry for {key:?}"
                )));
            }
            normalized.insert(key, auth);
        }
        Ok(Self {
            entries: normalized,
        })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty file is an empty map, not an error
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let entries: HashMap<String, Auth> = serde_yaml::from_str(yaml)?;
        Self::new(entries)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the login for a normalized target
    ///
    /// The lookup is an exact string match on the target's `scheme://host[:port]`
    /// form, against keys normalized the same way at load. Entries with an empty
    /// user or password are rejected.
    pub fn lookup(&self, target: &Target) -> Result<(&str, &SecretString)> {
        let key = target.to_string();
        let auth = self
            .entries
            .get(&key)
            .ok_or_else(|| ExporterError::MissingCredentials(key.clone()))?;

        match &auth.password {
            Some(password) if !auth.user.is_empty() && !password.expose_secret().is_empty() => {
                Ok((auth.user.as_str(), password))
            }
            _ => Err(ExporterError::IncompleteCredentials(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTH_YAML: &str = r#"
"https://svc01.example.com:7443":
  user: monitor
  password: secret
"https://svc02.example.com":
  user: monitor
"http://10.0.0.5":
  user: ""
  password: secret
"#;

    fn target(raw: &str) -> Target {
        Target::parse(raw).unwrap()
    }

    #[test]
    fn test_lookup_exact_match() {
        let credentials = Credentials::from_yaml_str(AUTH_YAML).unwrap();
        assert_eq!(credentials.len(), 3);

        let (user, password) = credentials
            .lookup(&target("https://svc01.example.com:7443/ignored"))
            .unwrap();
        assert_eq!(user, "monitor");
        assert_eq!(password.expose_secret(), "secret");
    }

    #[test]
    fn test_lookup_missing_target() {
        let credentials = Credentials::from_yaml_str(AUTH_YAML).unwrap();

        // Port is part of the key
        let err = credentials
            .lookup(&target("https://svc01.example.com"))
            .unwrap_err();
        assert!(matches!(err, ExporterError::MissingCredentials(_)));

        // So is the scheme
        let err = credentials
            .lookup(&target("http://svc01.example.com:7443"))
            .unwrap_err();
        assert!(matches!(err, ExporterError::MissingCredentials(_)));
    }

    #[test]
    fn test_lookup_incomplete_entries() {
        let credentials = Credentials::from_yaml_str(AUTH_YAML).unwrap();

        let err = credentials
            .lookup(&target("https://svc02.example.com"))
            .unwrap_err();
        assert!(matches!(err, ExporterError::IncompleteCredentials(_)));

        let err = credentials.lookup(&target("http://10.0.0.5")).unwrap_err();
        assert!(matches!(err, ExporterError::IncompleteCredentials(_)));
    }

    #[test]
    fn test_explicit_default_port_matches() {
        let credentials =
            Credentials::from_yaml_str("\"https://svc01:443\":\n  user: monitor\n  password: secret\n")
                .unwrap();

        let (user, _) = credentials.lookup(&target("https://svc01:443/")).unwrap();
        assert_eq!(user, "monitor");
        assert!(credentials.lookup(&target("https://svc01")).is_ok());
    }

    #[test]
    fn test_uppercase_host_matches() {
        let credentials = Credentials::from_yaml_str(
            "\"https://SVC01.example.com:7443\":\n  user: monitor\n  password: secret\n",
        )
        .unwrap();

        assert!(credentials
            .lookup(&target("https://SVC01.example.com:7443"))
            .is_ok());
        assert!(credentials
            .lookup(&target("https://svc01.example.com:7443/rest"))
            .is_ok());
    }

    #[test]
    fn test_invalid_key_rejected() {
        let err = Credentials::from_yaml_str("\"svc01\":\n  user: monitor\n  password: secret\n")
            .unwrap_err();
        assert!(matches!(err, ExporterError::Config(_)));
    }

    #[test]
    fn test_colliding_keys_rejected() {
        let yaml = r#"
"https://svc01:443":
  user: monitor
  password: secret
"https://SVC01":
  user: other
  password: secret
"#;
        let err = Credentials::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ExporterError::Config(_)));
    }

    #[test]
    fn test_empty_file() {
        let credentials = Credentials::from_yaml_str("").unwrap();
        assert!(credentials.is_empty());
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Credentials::from_yaml_str("- just\n- a list\n").unwrap_err();
        assert!(matches!(err, ExporterError::Yaml(_)));
    }
}
