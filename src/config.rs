use std::{net::SocketAddr, path::PathBuf};

use cardio_app::domain::variant::FormVariant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("{0} must be set together with {1}")]
    Incomplete(&'static str, &'static str),
    #[error("cannot resolve listen address {host}:{port}: {reason}")]
    Unresolvable {
        host: String,
        port: u16,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub file_path: PathBuf,
    pub archive_pattern: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub http_host: String,
    pub http_port: u16,
    pub default_variant: FormVariant,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub footer_credit: Option<String>,
    pub log: Option<LogConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads every setting through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let model_path = get("CARDIO_MODEL_PATH")
            .unwrap_or_else(|| "heart_disease_model.json".to_string())
            .into();

        let http_host = get("CARDIO_HTTP_HOST")
            .map(|h| h.trim().to_string())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        let http_port = parse_port("CARDIO_HTTP_PORT", get("CARDIO_HTTP_PORT"), 8501)?;

        let default_variant = match get("CARDIO_FORM_VARIANT") {
            Some(value) => value.parse::<FormVariant>().map_err(|e| {
                ConfigError::Invalid {
                    name: "CARDIO_FORM_VARIANT",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => FormVariant::default(),
        };

        let smtp_host = get("CARDIO_SMTP_HOST")
            .unwrap_or_else(|| cardio_email_lettre::DEFAULT_SMTP_HOST.to_string());
        let smtp_port = parse_port(
            "CARDIO_SMTP_PORT",
            get("CARDIO_SMTP_PORT"),
            cardio_email_lettre::DEFAULT_SMTP_PORT,
        )?;

        let log = match (get("LOG_FILE_PATH"), get("LOG_ARCHIVE_PATTERN")) {
            (Some(file_path), Some(archive_pattern)) => Some(LogConfig {
                file_path: file_path.into(),
                archive_pattern,
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::Incomplete("LOG_FILE_PATH", "LOG_ARCHIVE_PATTERN"));
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete("LOG_ARCHIVE_PATTERN", "LOG_FILE_PATH"));
            }
        };

        Ok(Self {
            model_path,
            http_host,
            http_port,
            default_variant,
            smtp_host,
            smtp_port,
            footer_credit: get("CARDIO_FOOTER_CREDIT"),
            log,
        })
    }

    /// Resolves `CARDIO_HTTP_HOST`, which may be an IP literal or a hostname
    /// such as `localhost`; the first address returned wins.
    pub async fn resolve_listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let unresolvable = |reason: String| ConfigError::Unresolvable {
            host: self.http_host.clone(),
            port: self.http_port,
            reason,
        };
        let mut addrs = tokio::net::lookup_host((self.http_host.as_str(), self.http_port))
            .await
            .map_err(|e| unresolvable(e.to_string()))?;
        addrs
            .next()
            .ok_or_else(|| unresolvable("no addresses found".to_string()))
    }
}

fn parse_port(name: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
            name,
            value,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.model_path, PathBuf::from("heart_disease_model.json"));
        assert_eq!(config.http_host, "127.0.0.1");
        assert_eq!(config.http_port, 8501);
        assert_eq!(config.default_variant, FormVariant::Classic);
        assert_eq!(config.smtp_host, "smtp.gmail.com");
        assert_eq!(config.smtp_port, 465);
        assert_eq!(config.footer_credit, None);
        assert_eq!(config.log, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CARDIO_HTTP_HOST", "0.0.0.0"),
            ("CARDIO_HTTP_PORT", "8080"),
            ("CARDIO_FORM_VARIANT", "bilingual"),
            ("CARDIO_FOOTER_CREDIT", "Created by the clinic"),
            ("LOG_FILE_PATH", "logs/cardio.log"),
            ("LOG_ARCHIVE_PATTERN", "logs/cardio.{}.log.gz"),
        ])
        .unwrap();
        assert_eq!(config.http_host, "0.0.0.0");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.default_variant, FormVariant::Bilingual);
        assert_eq!(config.footer_credit.as_deref(), Some("Created by the clinic"));
        assert_eq!(
            config.log.map(|l| l.archive_pattern),
            Some("logs/cardio.{}.log.gz".to_string())
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("CARDIO_HTTP_PORT", "http")]),
            Err(ConfigError::Invalid { name: "CARDIO_HTTP_PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("CARDIO_FORM_VARIANT", "dark")]),
            Err(ConfigError::Invalid { name: "CARDIO_FORM_VARIANT", .. })
        ));
        assert!(matches!(
            config_from(&[("LOG_FILE_PATH", "cardio.log")]),
            Err(ConfigError::Incomplete(..))
        ));
    }

    #[tokio::test]
    async fn test_listen_addr_from_ip_literal() {
        let config = config_from(&[("CARDIO_HTTP_HOST", "0.0.0.0")]).unwrap();
        assert_eq!(
            config.resolve_listen_addr().await.unwrap(),
            "0.0.0.0:8501".parse::<SocketAddr>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_listen_addr_from_hostname() {
        let config = config_from(&[
            ("CARDIO_HTTP_HOST", "localhost"),
            ("CARDIO_HTTP_PORT", "9000"),
        ])
        .unwrap();
        let addr = config.resolve_listen_addr().await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 9000);
    }

    #[tokio::test]
    async fn test_unresolvable_listen_host() {
        let config = config_from(&[("CARDIO_HTTP_HOST", "cardio.invalid")]).unwrap();
        assert!(matches!(
            config.resolve_listen_addr().await,
            Err(ConfigError::Unresolvable { .. })
        ));
    }
}
