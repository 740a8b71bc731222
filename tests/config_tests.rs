use std::fs;
use std::path::PathBuf;

use flowwager_core::config::Config;
use flowwager_core::error::{ConfigError, Error};
use rust_decimal_macros::dec;

fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("flowwager.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn well_formed_config_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[network]
access_node_url = "https://rest-testnet.onflow.org"
contract_address = "0xb1f2c3d4e5f6a7b8"

[client]
platform_fee_pct = 2.5
seal_poll_interval_ms = 250
seal_timeout_ms = 30000

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.network.contract_address, "0xb1f2c3d4e5f6a7b8");
    assert_eq!(config.client.platform_fee_pct, dec!(2.5));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn client_and_logging_sections_are_optional() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[network]
access_node_url = "https://rest-mainnet.onflow.org"
contract_address = "0xFlowWager"
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.client.platform_fee_pct, dec!(2.5));
    assert_eq!(config.logging.level, "info");
}

#[test]
fn missing_access_node_url_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[network]
access_node_url = ""
contract_address = "0xFlowWager"
"#,
    );

    match Config::load(&path) {
        Err(Error::Config(ConfigError::MissingField {
            field: "access_node_url",
        })) => {}
        other => panic!("expected missing access_node_url, got {other:?}"),
    }
}

#[test]
fn unparseable_access_node_url_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[network]
access_node_url = "not a url"
contract_address = "0xFlowWager"
"#,
    );

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "access_node_url",
            ..
        }))
    ));
}

#[test]
fn out_of_range_platform_fee_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[network]
access_node_url = "https://rest-mainnet.onflow.org"
contract_address = "0xFlowWager"

[client]
platform_fee_pct = 150.0
seal_poll_interval_ms = 500
seal_timeout_ms = 60000
"#,
    );

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "platform_fee_pct",
            ..
        }))
    ));
}

#[test]
fn unreadable_file_is_a_read_error() {
    assert!(matches!(
        Config::load("/definitely/not/a/real/path.toml"),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}
