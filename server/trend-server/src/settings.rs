//! Server configuration from an optional file and `TREND_*` variables

use serde::Deserialize;

/// Server settings. Every field has a default; a `config/trend-server`
/// file (any format the `config` crate reads) and `TREND_*` environment
/// variables override them, in that order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Directory holding the built client (index.html, wasm, js)
    pub static_dir: String,
    /// Users the mock store generates a history for
    pub seed_users: Vec<String>,
    /// User served when a request names none
    pub default_user: String,
    /// Days of generated history per user
    pub history_days: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            static_dir: "dist".to_string(),
            seed_users: vec!["demo".to_string()],
            default_user: "demo".to_string(),
            history_days: 730,
        }
    }
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/trend-server").required(false))
        .add_source(
            config::Environment::with_prefix("TREND")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("seed_users"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
