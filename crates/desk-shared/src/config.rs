//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_SLA_MINUTES, DEFAULT_SLA_WARNING_PERCENT};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerSettings,
    pub sla: SlaSettings,
    pub logging: LoggingSettings,
    #[serde(default)]
    pub seed: SeedSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
}

/// Defaults applied to tickets created without an explicit SLA.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SlaSettings {
    pub default_minutes: i64,
    pub default_warning_percent: i64,
}

impl Default for SlaSettings {
    fn default() -> Self {
        Self {
            default_minutes: DEFAULT_SLA_MINUTES,
            default_warning_percent: DEFAULT_SLA_WARNING_PERCENT,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
    /// Daily rolling log files are written here when set, stdout otherwise.
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedSettings {
    pub path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", env.clone())?
            .set_default("app.name", "desk-server")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("sla.default_minutes", DEFAULT_SLA_MINUTES)?
            .set_default("sla.default_warning_percent", DEFAULT_SLA_WARNING_PERCENT)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", true)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
