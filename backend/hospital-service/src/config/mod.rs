use std::collections::HashMap;

use anyhow::Context;
use serde::Deserialize;

/// Service settings, read from the process environment.
///
/// Keys map from upper-case environment variables: `DB_BASE_URL` becomes
/// `db_base_url`, `PORT` becomes `port`, and so on.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub db_base_url: String,
    #[serde(default = "default_db_name")]
    pub db_name: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default)]
    pub expose_patient_schedule: bool,
}

fn default_db_name() -> String {
    "hospital".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::build(config::Environment::default())
    }

    /// Same as [`Config::load`] but reads from `vars` instead of the process
    /// environment.
    pub fn from_env_map(vars: HashMap<String, String>) -> anyhow::Result<Self> {
        Self::build(config::Environment::default().source(Some(vars)))
    }

    fn build(env: config::Environment) -> anyhow::Result<Self> {
        let env = env
            .ignore_empty(true)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("cors_allowed_origins");

        let config: Config = config::Config::builder()
            .add_source(env)
            .build()?
            .try_deserialize()
            .context("Invalid configuration")?;

        if config.db_base_url.trim().is_empty() {
            anyhow::bail!("DB_BASE_URL environment variable not set");
        }

        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Config suitable for tests that never reach a real database.
    pub fn for_tests() -> Self {
        Self {
            db_base_url: "mongodb://localhost:27017".to_string(),
            db_name: default_db_name(),
            host: "127.0.0.1".to_string(),
            port: default_port(),
            cors_allowed_origins: default_cors_allowed_origins(),
            expose_patient_schedule: false,
        }
    }
}
