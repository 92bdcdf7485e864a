//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use std::path::Path;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use mcc_config::MccConfig;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
host = "127.0.0.1"
port = 9000
cors_origins = ["http://localhost:3000"]

[database]
path = "/var/lib/mcc/control.db"

[mcp]
base_url = "http://mcp.internal:8001"
token = "mcp-token"
timeout_secs = 5

[github]
token = "ghp_toml"
sync_enabled = true

[general]
debug = true
default_limit = 25
"#,
        )?;

        let config: MccConfig = Figment::from(Serialized::defaults(MccConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.bind_addr(), "127.0.0.1:9000");
        assert!(!config.server.allows_any_origin());
        assert_eq!(config.database.path, "/var/lib/mcc/control.db");
        assert_eq!(config.mcp.base_url, "http://mcp.internal:8001");
        assert_eq!(config.mcp.token(), Some("mcp-token"));
        assert_eq!(config.mcp.timeout_secs, 5);
        assert!(config.github.is_configured());
        assert!(config.github.sync_enabled);
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert!(config.general.debug);
        assert_eq!(config.general.default_limit, 25);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
port = 8080
"#,
        )?;

        let config: MccConfig = Figment::from(Serialized::defaults(MccConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.mcp.timeout_secs, 30);
        assert_eq!(config.general.default_limit, 10);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".mcc")?;
        jail.create_file(
            ".mcc/config.toml",
            r#"
[database]
path = "local.db"
"#,
        )?;

        let config = MccConfig::load(None).expect("config loads");
        assert_eq!(config.database.path, "local.db");
        Ok(())
    });
}

#[test]
fn explicit_file_replaces_project_local_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".mcc")?;
        jail.create_file(".mcc/config.toml", "[database]\npath = \"local.db\"\n")?;
        jail.create_file("custom.toml", "[database]\npath = \"custom.db\"\n")?;

        let config = MccConfig::load(Some(Path::new("custom.toml"))).expect("config loads");
        assert_eq!(config.database.path, "custom.db");
        Ok(())
    });
}

#[test]
fn invalid_value_in_file_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("bad.toml", "[mcp]\ntimeout_secs = 0\n")?;

        let result = MccConfig::load(Some(Path::new("bad.toml")));
        assert!(result.is_err());
        Ok(())
    });
}
