//! Configuration resolution tests
//!
//! Tests that manipulate LEARNSMART_* environment variables are marked
//! #[serial] so they never run in parallel with each other.

use clap::Parser;
use learnsmart_common::config::{Service, ServiceArgs, ServiceConfig, TomlConfig};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    service: ServiceArgs,
}

fn clear_env() {
    env::remove_var("LEARNSMART_PORT");
    env::remove_var("LEARNSMART_HOST");
    env::remove_var("LEARNSMART_DATABASE");
    env::remove_var("LEARNSMART_CONFIG");
}

#[test]
fn test_load_full_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
host = "0.0.0.0"
port = 9081
database = "/srv/learnsmart/profile.db"
http_timeout_secs = 5

[logging]
level = "debug"

[services]
planning = "http://planning.internal:8083"
"#
    )
    .unwrap();

    let toml = TomlConfig::load(file.path()).unwrap();
    let config = ServiceConfig::resolve(Service::Profile, &ServiceArgs::default(), &toml);

    assert_eq!(config.bind_addr(), "0.0.0.0:9081");
    assert_eq!(config.database, PathBuf::from("/srv/learnsmart/profile.db"));
    assert_eq!(config.http_timeout, Duration::from_secs(5));
    assert_eq!(config.log_level, "debug");
    assert_eq!(
        config.collaborator_url(Service::Planning, None),
        "http://planning.internal:8083"
    );
}

#[test]
fn test_broken_explicit_file_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port = \"not a number\"").unwrap();

    let toml = TomlConfig::load_or_default(Some(file.path()), Service::Content);
    assert!(toml.port.is_none());
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let toml = TomlConfig::load_or_default(Some(&dir.path().join("absent.toml")), Service::Content);

    let config = ServiceConfig::resolve(Service::Content, &ServiceArgs::default(), &toml);
    assert_eq!(config.port, 8082);
}

#[test]
#[serial]
fn test_env_var_used_when_no_cli_flag() {
    clear_env();
    env::set_var("LEARNSMART_PORT", "7001");

    let cli = TestCli::try_parse_from(["svc"]).unwrap();
    assert_eq!(cli.service.port, Some(7001));

    clear_env();
}

#[test]
#[serial]
fn test_cli_flag_beats_env_var() {
    clear_env();
    env::set_var("LEARNSMART_PORT", "7001");

    let cli = TestCli::try_parse_from(["svc", "--port", "7002"]).unwrap();
    assert_eq!(cli.service.port, Some(7002));

    clear_env();
}

#[test]
#[serial]
fn test_no_flags_no_env() {
    clear_env();

    let cli = TestCli::try_parse_from(["svc"]).unwrap();
    assert!(cli.service.port.is_none());
    assert!(cli.service.database.is_none());
}
