use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;

///
/// TransportConfig
///
/// Settings for the default HTTP transport. Every field has a default, so a
/// partial JSON or TOML document is enough.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TransportConfig {
    /// Whole-request timeout; expiry surfaces as `ClientError::Transport`.
    pub timeout_secs: u64,
    /// Sent as `Authorization: Bearer <key>` when present.
    pub api_key: Option<String>,
    pub user_agent: String,
    pub default_headers: BTreeMap<String, String>,
}

impl TransportConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            api_key: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            default_headers: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = TransportConfig::from_toml(
            r#"
            api_key = "secret"

            [default_headers]
            x-tenant = "blue"
            "#,
        )
        .expect("config parses");

        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.default_headers["x-tenant"], "blue");
        assert!(config.user_agent.starts_with("modelkit-client/"));
    }

    #[test]
    fn json_overrides_timeout() {
        let config = TransportConfig::from_json(r#"{ "timeout_secs": 5 }"#).expect("config parses");

        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            TransportConfig::from_json(r#"{ "timeout": 5 }"#),
            Err(ConfigError::Json(_))
        ));
    }
}
