use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set
    pub level: String,
    pub ansi: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty_json: bool,
    pub default_json: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply per-key overrides. Blank levels and unparsable booleans keep the default.
    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("LOG_LEVEL") {
            if !v.trim().is_empty() {
                self.logging.level = v.trim().to_string();
            }
        }
        if let Some(v) = lookup("LOG_ANSI") {
            self.logging.ansi = v.trim().parse().unwrap_or(self.logging.ansi);
        }

        if let Some(v) = lookup("OUTPUT_PRETTY_JSON") {
            self.output.pretty_json = v.trim().parse().unwrap_or(self.output.pretty_json);
        }
        if let Some(v) = lookup("OUTPUT_DEFAULT_JSON") {
            self.output.default_json = v.trim().parse().unwrap_or(self.output.default_json);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            logging: LoggingConfig {
                level: "debug".to_string(),
                ansi: true,
            },
            output: OutputConfig {
                pretty_json: true,
                default_json: false,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            logging: LoggingConfig {
                level: "info".to_string(),
                ansi: false,
            },
            output: OutputConfig {
                pretty_json: true,
                default_json: false,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            logging: LoggingConfig {
                level: "warn".to_string(),
                ansi: false,
            },
            output: OutputConfig {
                pretty_json: false,
                default_json: true,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
