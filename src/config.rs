//! Application configuration module
//! Handles environment variable loading, configuration validation, and application settings

use crate::payments::providers::AcquiringBankConfig;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub bank: BankConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Acquiring bank connection settings
#[derive(Debug, Clone)]
pub struct BankConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log format options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Plain,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenv::dotenv().ok();

        Ok(AppConfig {
            server: ServerConfig::from_env()?,
            bank: BankConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.bank.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(ServerConfig {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue(
                "SERVER_PORT cannot be 0".to_string(),
            ));
        }

        if self.host.is_empty() {
            return Err(ConfigError::InvalidValue(
                "SERVER_HOST cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BankConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(BankConfig {
            base_url: env::var("ACQUIRING_BANK_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            timeout_secs: env::var("ACQUIRING_BANK_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ACQUIRING_BANK_TIMEOUT_SECS".to_string()))?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "ACQUIRING_BANK_BASE_URL must be a valid URL".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "ACQUIRING_BANK_TIMEOUT_SECS".to_string(),
            ));
        }

        Ok(())
    }

    pub fn to_provider_config(&self) -> AcquiringBankConfig {
        AcquiringBankConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string()),
            format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "plain".to_string())
                .parse()?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];
        if !valid_levels.contains(&self.level.to_uppercase().as_str()) {
            return Err(ConfigError::InvalidValue("LOG_LEVEL".to_string()));
        }

        Ok(())
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "plain" | "" => Ok(LogFormat::Plain),
            other => Err(ConfigError::InvalidValue(format!(
                "LOG_FORMAT must be 'json' or 'plain', got '{}'",
                other
            ))),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            format: LogFormat::Plain,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for configuration: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_validation() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            host: String::new(),
            port: 8000,
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_bank_config_validation() {
        let config = BankConfig {
            base_url: "localhost:8080".to_string(),
            timeout_secs: 10,
        };
        assert!(config.validate().is_err());

        let config = BankConfig {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 0,
        };
        assert!(config.validate().is_err());

        let config = BankConfig {
            base_url: "https://bank.example".to_string(),
            timeout_secs: 3,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.to_provider_config().timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_logging_config_validation() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            format: LogFormat::Plain,
        };
        assert!(config.validate().is_err());
        assert!(LoggingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Plain".parse::<LogFormat>().unwrap(), LogFormat::Plain);
        assert!(matches!(
            "jsno".parse::<LogFormat>(),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
