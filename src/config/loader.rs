use std::{env, net::SocketAddr, str::FromStr, time::Duration};

use url::Url;

use super::env::{
    AppConfig, ClassifierConfig, ConfigError, DirectoryConfig, LoggingConfig, SessionConfig,
};

pub const DEFAULT_WEBHOOK_URL: &str = "https://neveszr.app.n8n.cloud/webhook/classificar";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = parse_or("BIND_ADDR", "0.0.0.0:8080".parse::<SocketAddr>().ok())?;

        let webhook_url = env::var("CLASSIFIER_WEBHOOK_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WEBHOOK_URL.to_string());
        validate_http_url("CLASSIFIER_WEBHOOK_URL", &webhook_url)?;

        let classifier = ClassifierConfig {
            webhook_url,
            timeout: parse_optional::<u64>("CLASSIFIER_TIMEOUT_MS")?
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
        };

        let sessions = SessionConfig {
            ttl: Duration::from_secs(parse_or("SESSION_TTL_SECS", Some(1_800))?),
            sweep_cron: env::var("SESSION_SWEEP_CRON")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "0 * * * * *".to_string()),
            pending_refresh_secs: parse_or("PENDING_REFRESH_SECS", Some(1))?.max(1),
            capacity: parse_or("SESSION_CAPACITY", Some(10_000))?.max(1),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(Self {
            bind_addr,
            classifier,
            sessions,
            directories,
            logging,
        })
    }
}

fn parse_optional<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(None),
    }
}

fn parse_or<T: FromStr>(key: &'static str, default: Option<T>) -> Result<T, ConfigError> {
    match parse_optional(key)? {
        Some(value) => Ok(value),
        None => default.ok_or(ConfigError::Invalid {
            key,
            value: String::new(),
        }),
    }
}

pub(crate) fn validate_http_url(key: &'static str, raw: &str) -> Result<(), ConfigError> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        Ok(_) => Err(ConfigError::UnsupportedUrl {
            key,
            value: raw.to_string(),
        }),
        Err(_) => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_url_must_be_http() {
        assert!(validate_http_url("X", DEFAULT_WEBHOOK_URL).is_ok());
        assert!(validate_http_url("X", "http://127.0.0.1:9000/hook").is_ok());
        assert!(matches!(
            validate_http_url("X", "ftp://example.com/hook"),
            Err(ConfigError::UnsupportedUrl { .. })
        ));
        assert!(matches!(
            validate_http_url("X", "not a url"),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
