use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub signals: SignalConfig,
    pub favicon: FaviconConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
    pub reports_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct SignalConfig {
    pub wikipedia_api_url: String,
    pub schema_proxy_url: String,
    pub fetch_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct FaviconConfig {
    pub service_url: String,
    pub size: u32,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub renderer_bin: String,
    pub timezone: String,
    pub contact: Option<String>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            wikipedia_api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            schema_proxy_url: "https://cors-anywhere.herokuapp.com".to_string(),
            fetch_timeout: Duration::from_millis(10_000),
        }
    }
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            service_url: "https://www.google.com/s2/favicons".to_string(),
            size: 128,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            renderer_bin: "wkhtmltopdf".to_string(),
            timezone: "UTC".to_string(),
            contact: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
