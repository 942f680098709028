use std::env;
use std::fs;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::display::{Currency, Locale};

/// Environment variable holding the lead sink address.
pub const LEAD_WEBHOOK_ENV: &str = "LEAD_WEBHOOK_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Where leads are forwarded. `None` disables forwarding.
    pub lead_webhook_url: Option<String>,
    pub locale: Locale,
    pub currency: Currency,
    /// PNG/JPEG placed in the report header, skipped when unreadable.
    pub brand_logo: Option<String>,
    pub output_dir: String,
    pub listen: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lead_webhook_url: None,
            locale: Locale::default(),
            currency: Currency::default(),
            brand_logo: None,
            output_dir: ".".to_string(),
            listen: "127.0.0.1:3000".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml_file(filepath: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(filepath)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AppConfig = serde_yaml::from_str(contents)?;
        Ok(config.normalized())
    }

    /// Reads the optional config file, then applies environment overrides.
    pub fn load(filepath: Option<&str>) -> Result<Self, ConfigError> {
        let config = match filepath {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_webhook_override(env::var(LEAD_WEBHOOK_ENV).ok()))
    }

    /// A non-empty override replaces the configured address.
    pub fn with_webhook_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            debug!(%url, "lead webhook taken from environment");
            self.lead_webhook_url = Some(url);
        }
        self
    }

    fn normalized(mut self) -> Self {
        self.lead_webhook_url = self
            .lead_webhook_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self.brand_logo = self.brand_logo.filter(|path| !path.trim().is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_keys_use_defaults() {
        let config = AppConfig::from_yaml_str("currency: EUR\n").unwrap();
        assert_eq!(config.currency, Currency::Eur);
        assert_eq!(config.locale, Locale::EnGb);
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.lead_webhook_url, None);
    }

    #[test]
    fn reads_full_config_file() {
        let file = assert_fs::NamedTempFile::new("config.yaml").unwrap();
        file.write_str(
            "lead_webhook_url: https://hooks.example.test/lead\nlocale: de-DE\ncurrency: USD\nbrand_logo: logo.png\noutput_dir: reports\nlisten: 0.0.0.0:8080\n",
        )
        .unwrap();

        let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            config,
            AppConfig {
                lead_webhook_url: Some("https://hooks.example.test/lead".to_string()),
                locale: Locale::DeDe,
                currency: Currency::Usd,
                brand_logo: Some("logo.png".to_string()),
                output_dir: "reports".to_string(),
                listen: "0.0.0.0:8080".to_string(),
            }
        );
    }

    #[test]
    fn blank_webhook_disables_forwarding() {
        let config = AppConfig::from_yaml_str("lead_webhook_url: '  '\n").unwrap();
        assert_eq!(config.lead_webhook_url, None);
    }

    #[test]
    fn environment_override_wins_unless_empty() {
        let config = AppConfig::default()
            .with_webhook_override(Some("http://127.0.0.1:9/hook".to_string()));
        assert_eq!(config.lead_webhook_url.as_deref(), Some("http://127.0.0.1:9/hook"));

        let config = config.with_webhook_override(Some(String::new()));
        assert_eq!(config.lead_webhook_url.as_deref(), Some("http://127.0.0.1:9/hook"));
    }

    #[test]
    fn invalid_locale_is_a_parse_error() {
        let error = AppConfig::from_yaml_str("locale: fr-FR\n").expect_err("expected parse error");
        assert!(matches!(error, ConfigError::Parse(_)));
    }
}
