//! CLI integration tests.
//!
//! These tests verify the CLI argument parsing, configuration loading and
//! bundle discovery the binary performs at startup.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

use menu_tunnel::cli::{parse_args_from, Args};
use menu_tunnel::config::Config;
use menu_tunnel::Bundle;

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("menu-tunnel")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&[])).unwrap();

    assert!(result.host.is_none());
    assert!(result.port.is_none());
    assert!(result.config.is_none());
    assert!(result.bundles.is_none());
    assert!(result.locale.is_none());
    assert!(!result.help);
    assert!(!result.version);
}

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&[
        "-H",
        "0.0.0.0",
        "-p",
        "8080",
        "-b",
        "/srv/bundles",
        "-L",
        "ru",
        "-l",
        "debug",
    ]))
    .unwrap();

    assert_eq!(result.host.unwrap().to_string(), "0.0.0.0");
    assert_eq!(result.port, Some(8080));
    assert_eq!(result.bundles, Some(PathBuf::from("/srv/bundles")));
    assert_eq!(result.locale, Some("ru".to_string()));
    assert_eq!(result.log_level, Some("debug".to_string()));
}

#[test]
fn test_cli_config_file() {
    let result = parse_args_from(args(&["-c", "/etc/menu-tunnel.json"])).unwrap();

    assert!(result.config.is_some());
    assert_eq!(
        result.config.unwrap().to_str().unwrap(),
        "/etc/menu-tunnel.json"
    );
}

#[test]
fn test_cli_invalid_port() {
    let result = parse_args_from(args(&["-p", "not-a-number"]));
    assert!(result.is_err());
}

#[test]
fn test_cli_invalid_host() {
    let result = parse_args_from(args(&["-H", "not-an-ip"]));
    assert!(result.is_err());
}

#[test]
fn test_cli_unknown_flag() {
    let result = parse_args_from(args(&["--no-such-flag"]));
    assert!(result.is_err());
}

// ============================================================================
// Configuration Loading Tests
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let json = r#"{
        "server": {
            "host": "192.168.1.100",
            "port": 9000
        },
        "menus": {
            "bundles_dir": "/opt/menu-tunnel/bundles",
            "default_locale": "ru"
        },
        "logging": {
            "level": "debug"
        }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.server.host, "192.168.1.100");
    assert_eq!(config.server.port, 9000);
    assert_eq!(
        config.menus.bundles_dir,
        PathBuf::from("/opt/menu-tunnel/bundles")
    );
    assert_eq!(config.menus.default_locale, "ru");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_config_priority_cli_over_file() {
    // Create config file
    let json = r#"{
        "server": {
            "host": "10.0.0.1",
            "port": 5000
        },
        "menus": {
            "default_locale": "de"
        }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    // CLI args should override file
    let args = Args {
        host: Some("192.168.1.1".parse().unwrap()),
        locale: Some("ru".to_string()),
        config: Some(file.path().to_path_buf()),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();

    // CLI values should win, file values fill the rest
    assert_eq!(config.server.host, "192.168.1.1");
    assert_eq!(config.menus.default_locale, "ru");
    assert_eq!(config.server.port, 5000);
}

#[test]
fn test_config_missing_file() {
    let args = Args {
        config: Some(PathBuf::from("/nonexistent/menu-tunnel.json")),
        ..Args::default()
    };

    assert!(Config::load(&args).is_err());
}

#[test]
fn test_config_to_server_config() {
    let args = Args {
        host: Some("0.0.0.0".parse().unwrap()),
        port: Some(8080),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();
    let server_config = config.to_server_config().unwrap();

    assert_eq!(server_config.host, "0.0.0.0");
    assert_eq!(server_config.port, 8080);
    assert_eq!(server_config.bind_address(), "0.0.0.0:8080");
}

// ============================================================================
// Configuration Serialization Tests
// ============================================================================

#[test]
fn test_config_roundtrip() {
    let original = Config::default();
    let json = serde_json::to_string(&original).unwrap();
    let loaded: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(original.server.host, loaded.server.host);
    assert_eq!(original.server.port, loaded.server.port);
    assert_eq!(original.menus.bundles_dir, loaded.menus.bundles_dir);
}

#[test]
fn test_config_partial_deserialization() {
    // Only specify some fields, others should use defaults
    let json = r#"{"server": {"port": 9999}}"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.server.port, 9999);
    assert_eq!(config.server.host, "127.0.0.1"); // Default
    assert_eq!(config.menus.default_locale, "en"); // Default
}

// ============================================================================
// Bundle Discovery Tests
// ============================================================================

#[test]
fn test_shipped_bundles_load() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("bundles");
    let bundle = Bundle::load(&dir, "en").unwrap();

    assert!(bundle.locales().iter().any(|l| l == "en"));
    assert!(bundle.locales().iter().any(|l| l == "ru"));
    assert_eq!(bundle.get("menu.close", "en_US"), "Close");
    assert_eq!(
        bundle.format("menu.main.hello", "en", &["alice".to_string()]),
        "Hello, alice!"
    );
}

#[test]
fn test_bundle_dir_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bundle_en.properties"),
        "menu.close=Close\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("bundle_de.properties"),
        "menu.close=Schließen\n",
    )
    .unwrap();

    let args = Args {
        bundles: Some(dir.path().to_path_buf()),
        ..Args::default()
    };
    let config = Config::load(&args).unwrap();
    let bundle = Bundle::load(&config.menus.bundles_dir, &config.menus.default_locale).unwrap();

    assert_eq!(bundle.get("menu.close", "de_AT"), "Schließen");
    assert_eq!(bundle.get("menu.close", "fr"), "Close");
    assert_eq!(bundle.get("menu.unknown", "de"), "menu.unknown");
}
