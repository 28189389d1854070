//! Configuration and credential file tests

use spectrum_virtualize_exporter::config::Config;
use spectrum_virtualize_exporter::credentials::Credentials;
use spectrum_virtualize_exporter::spectrum::Target;
use std::path::Path;

#[test]
fn test_default_config_file_loads() {
    // Given: The shipped default configuration
    // When: Loading it
    let config = Config::load("config/Default.toml").expect("Failed to load default config");

    // Then: It matches the built-in defaults
    assert_eq!(config.server.addr, "0.0.0.0");
    assert_eq!(config.server.port, 9747);
    assert_eq!(config.probe.timeout_seconds, 30);
    assert!(!config.probe.fail_fast);
}

#[test]
fn test_timeout_is_validated() {
    // Given: A configuration with a zero deadline
    let mut config = Config::default();
    config.probe.timeout_seconds = 0;

    // When: Validating it
    // Then: It is rejected
    assert!(config.validate().is_err());
}

#[test]
fn test_example_auth_file_loads() {
    // Given: The example credential map
    let credentials =
        Credentials::load(Path::new("auth.yaml.example")).expect("Failed to load auth file");

    // When: Looking up its target written with another host case and a path
    let target = Target::parse("https://SVC01.example.com:7443/rest").unwrap();
    let (user, _) = credentials.lookup(&target).unwrap();

    // Then: The entry is found
    assert_eq!(credentials.len(), 1);
    assert_eq!(user, "monitor");
}

#[test]
fn test_empty_auth_file_is_empty_map() {
    // Given: An empty credential file
    // When: Parsing it
    let credentials = Credentials::from_yaml_str("").unwrap();

    // Then: No targets are registered
    assert!(credentials.is_empty());
}

#[test]
fn test_malformed_auth_file_is_error() {
    // Given: A credential file that is not a map
    // When: Parsing it
    // Then: Loading fails
    assert!(Credentials::from_yaml_str("- just\n- a list\n").is_err());
}
