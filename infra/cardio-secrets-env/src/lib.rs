use std::collections::HashMap;

use cardio_app::ports::secrets::{EMAIL_SECRET, PASSWORD_SECRET, SecretsPort};
use log::debug;

/// Resolves secrets from process environment variables.
pub struct EnvSecrets {
    mapping: HashMap<String, String>,
}

impl EnvSecrets {
    pub fn new() -> Self {
        let mapping = HashMap::from([
            (EMAIL_SECRET.to_string(), "CARDIO_EMAIL".to_string()),
            (PASSWORD_SECRET.to_string(), "CARDIO_EMAIL_PASSWORD".to_string()),
        ]);
        Self { mapping }
    }

    pub fn variable_for(&self, key: &str) -> Option<&str> {
        self.mapping.get(key).map(String::as_str)
    }
}

impl Default for EnvSecrets {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretsPort for EnvSecrets {
    fn get(&self, key: &str) -> Option<String> {
        let var = self.variable_for(key)?;
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Some(value),
            _ => {
                debug!("Secret '{}' not found in {}", key, var);
                None
            }
        }
    }
}

/// Fixed secrets, for tests and local runs.
#[derive(Default, Clone)]
pub struct StaticSecrets {
    values: HashMap<String, String>,
}

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl SecretsPort for StaticSecrets {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_mapping() {
        let secrets = EnvSecrets::new();
        assert_eq!(secrets.variable_for(EMAIL_SECRET), Some("CARDIO_EMAIL"));
        assert_eq!(
            secrets.variable_for(PASSWORD_SECRET),
            Some("CARDIO_EMAIL_PASSWORD")
        );
        assert_eq!(secrets.get("api_token"), None);
    }

    #[test]
    fn test_static_secrets_treat_blank_as_missing() {
        let secrets = StaticSecrets::new()
            .with(EMAIL_SECRET, "owner@example.com")
            .with(PASSWORD_SECRET, "  ");
        assert_eq!(
            secrets.get(EMAIL_SECRET),
            Some("owner@example.com".to_string())
        );
        assert_eq!(secrets.get(PASSWORD_SECRET), None);
    }
}
