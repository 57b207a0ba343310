use anyhow::bail;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Deserialize, Clone)]
pub struct ProxyConfig {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load `config/proxy.*` (optional) overlaid with `WEATHER_*` environment
/// variables, e.g. `WEATHER_UPSTREAM__API_KEY` or `WEATHER_SERVER__PORT`.
pub fn load_proxy_config() -> anyhow::Result<ProxyConfig> {
    let builder = config::Config::builder()
        .add_source(File::with_name("config/proxy").required(false))
        .add_source(
            Environment::with_prefix("WEATHER")
                .prefix_separator("_")
                .separator("__"),
        );

    build_proxy_config(builder)
}

pub fn build_proxy_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<ProxyConfig> {
    let settings = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000_i64)?
        .set_default("upstream.base_url", DEFAULT_UPSTREAM_BASE_URL)?
        .set_default("upstream.api_key", "")?
        .set_default("upstream.timeout_secs", 10_i64)?
        .build()?;

    let config: ProxyConfig = settings.try_deserialize()?;

    if config.upstream.api_key.trim().is_empty() {
        bail!("upstream.api_key is not set (WEATHER_UPSTREAM__API_KEY)");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> anyhow::Result<ProxyConfig> {
        build_proxy_config(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn test_defaults_fill_missing_settings() {
        let config = from_toml("[upstream]\napi_key = \"secret\"\n").unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.upstream.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [upstream]
            base_url = "http://localhost:9000"
            api_key = "secret"
            timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.upstream.base_url, "http://localhost:9000");
        assert_eq!(config.upstream.timeout_secs, 3);
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let err = from_toml("[server]\nport = 4000\n").unwrap_err();
        assert!(err.to_string().contains("upstream.api_key"));
    }
}
