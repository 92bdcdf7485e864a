use figment::Jail;
use mcc_config::MccConfig;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("MCC_MCP__BASE_URL", "http://mcp.from.env:9001");
        jail.set_env("MCC_MCP__TOKEN", "env-token");
        jail.set_env("MCC_GITHUB__SYNC_ENABLED", "true");
        jail.set_env("MCC_SERVER__PORT", "8181");

        let config = MccConfig::load(None).expect("config loads");
        assert_eq!(config.mcp.base_url, "http://mcp.from.env:9001");
        assert_eq!(config.mcp.token(), Some("env-token"));
        assert!(config.github.sync_enabled);
        assert_eq!(config.server.port, 8181);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".mcc")?;
        jail.create_file(".mcc/config.toml", "[general]\ndefault_limit = 50\n")?;
        jail.set_env("MCC_GENERAL__DEFAULT_LIMIT", "5");

        let config = MccConfig::load(None).expect("config loads");
        assert_eq!(config.general.default_limit, 5);
        Ok(())
    });
}

#[test]
fn malformed_env_value_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("MCC_SERVER__PORT", "not-a-port");
        assert!(MccConfig::load(None).is_err());
        Ok(())
    });
}
