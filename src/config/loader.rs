use std::{env, str::FromStr, time::Duration};

use super::env::{
    AppConfig, ConfigError, DirectoryConfig, FaviconConfig, LoggingConfig, ReportConfig,
    SignalConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
            reports_dir: env::var("REPORTS_DIR").unwrap_or_else(|_| "reports".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        let signal_defaults = SignalConfig::default();
        let signals = SignalConfig {
            wikipedia_api_url: non_empty("WIKIPEDIA_API_URL")
                .unwrap_or(signal_defaults.wikipedia_api_url),
            schema_proxy_url: non_empty("SCHEMA_PROXY_URL")
                .unwrap_or(signal_defaults.schema_proxy_url),
            fetch_timeout: parse_num::<u64>("SIGNAL_FETCH_TIMEOUT")?
                .map(Duration::from_millis)
                .unwrap_or(signal_defaults.fetch_timeout),
        };

        let favicon_defaults = FaviconConfig::default();
        let favicon = FaviconConfig {
            service_url: non_empty("FAVICON_SERVICE_URL").unwrap_or(favicon_defaults.service_url),
            size: parse_num::<u32>("FAVICON_SIZE")?.unwrap_or(favicon_defaults.size),
        };

        let report_defaults = ReportConfig::default();
        let report = ReportConfig {
            renderer_bin: non_empty("PDF_RENDERER_BIN").unwrap_or(report_defaults.renderer_bin),
            timezone: non_empty("REPORT_TIMEZONE").unwrap_or(report_defaults.timezone),
            contact: non_empty("REPORT_CONTACT"),
        };

        Ok(Self {
            directories,
            logging,
            signals,
            favicon,
            report,
        })
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_num<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match non_empty(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable so parallel test threads never race.
    #[test]
    fn parse_num_rejects_garbage() {
        env::set_var("GEO_TEST_BAD_NUMBER", "ten");
        let err = parse_num::<u64>("GEO_TEST_BAD_NUMBER").unwrap_err();
        assert!(err.to_string().contains("GEO_TEST_BAD_NUMBER"));
    }

    #[test]
    fn parse_num_treats_blank_as_unset() {
        env::set_var("GEO_TEST_BLANK_NUMBER", "  ");
        assert_eq!(parse_num::<u32>("GEO_TEST_BLANK_NUMBER").unwrap(), None);
    }

    #[test]
    fn parse_num_reads_value() {
        env::set_var("GEO_TEST_GOOD_NUMBER", "2500");
        assert_eq!(parse_num::<u64>("GEO_TEST_GOOD_NUMBER").unwrap(), Some(2500));
    }
}
