use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter;

use crate::{
    environment::ApiEnvironment,
    target::{default_landing_host, Product, RegistrationTarget},
};

pub const DEFAULT_FILE_NAME: &str = "create-account.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// log level, can be "info", "debug", "trace".
    pub log_level: Option<String>,
    /// Log at debug level if true and no log level is set.
    pub debug: Option<bool>,
    /// Deployment to register against, resolved from the process environment if absent.
    pub environment: Option<ApiEnvironment>,
    /// Signup flows in addition to the product presets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetConfig {
    pub name: String,
    #[serde(default)]
    pub additional_path: String,
    /// Defaults to the kSuite host of the deployment.
    pub landing_host: Option<String>,
}

impl TargetConfig {
    pub fn target(&self, deployment_host: &str) -> RegistrationTarget {
        let landing_host = self
            .landing_host
            .clone()
            .unwrap_or_else(|| default_landing_host(deployment_host));
        RegistrationTarget::new(
            self.name.clone(),
            landing_host,
            &self.additional_path,
            deployment_host,
        )
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = std::fs::read_to_string(path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ConfigError::NotFound,
                _ => ConfigError::ReadingFile(format!("Reading configuration file: {}", e)),
            })
            .and_then(|file_content| {
                toml::from_str::<Config>(&file_content).map_err(|e| {
                    ConfigError::ReadingFile(format!("Parsing configuration file: {}", e))
                })
            })?;

        // check if log_level field is valid
        config.log_level()?;

        for target in &config.targets {
            if target.name.trim().is_empty() {
                return Err(ConfigError::InvalidField(
                    "targets",
                    "target name cannot be empty".to_string(),
                ));
            }
        }

        Ok(config)
    }

    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string(&self)
            .map_err(|e| ConfigError::WritingFile(format!("Failed to serialize config: {}", e)))?;

        let mut config_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| ConfigError::WritingFile(e.to_string()))?;

        config_file.write_all(content.as_bytes()).map_err(|e| {
            tracing::warn!("failed to write to file: {:?}", e);
            ConfigError::WritingFile(e.to_string())
        })?;

        tracing::info!("Done writing create-account configuration file");
        Ok(())
    }

    pub fn log_level(&self) -> Result<filter::LevelFilter, ConfigError> {
        if let Some(level) = &self.log_level {
            match level.as_ref() {
                "info" => Ok(filter::LevelFilter::INFO),
                "debug" => Ok(filter::LevelFilter::DEBUG),
                "trace" => Ok(filter::LevelFilter::TRACE),
                _ => Err(ConfigError::InvalidField(
                    "log_level",
                    format!("Unknown value '{}'", level),
                )),
            }
        } else if let Some(true) = self.debug {
            Ok(filter::LevelFilter::DEBUG)
        } else {
            Ok(filter::LevelFilter::INFO)
        }
    }

    pub fn environment(&self) -> ApiEnvironment {
        self.environment
            .clone()
            .unwrap_or_else(ApiEnvironment::current)
    }

    /// Registration target for `name`: configured targets first, then the product presets.
    pub fn target(&self, name: &str) -> Option<RegistrationTarget> {
        let environment = self.environment();
        if let Some(target) = self.targets.iter().find(|t| t.name == name) {
            return Some(target.target(environment.host()));
        }
        Product::from_name(name).map(|product| product.target(environment.host()))
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum ConfigError {
    InvalidField(&'static str, String),
    NotFound,
    ReadingFile(String),
    WritingFile(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Config file not found"),
            Self::InvalidField(field, message) => {
                write!(f, "Config field {} is invalid: {}", field, message)
            }
            Self::ReadingFile(e) => write!(f, "Error while reading file: {}", e),
            Self::WritingFile(e) => write!(f, "Error while writing file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Default path of the configuration file, in a "create-account" directory
/// of the XDG standard configuration directory.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    if let Some(mut path) = dirs::config_dir() {
        path.push("create-account");
        path.push(DEFAULT_FILE_NAME);
        return Ok(path);
    }

    Err(ConfigError::NotFound)
}
