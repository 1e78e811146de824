use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::client::{AlphaSmsClientBuilder, Auth};
use crate::domain::ConfigurationError;

/// Plain configuration record for [`crate::AlphaSmsClient`].
///
/// Deserializable from any serde format, so credentials can come from a config file or
/// environment-driven loader instead of being wired up in code. Blank values count as
/// absent.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub login: Option<String>,
    pub password: Option<String>,
    pub key: Option<String>,
    /// Default alpha name for outgoing messages.
    pub sender: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Resolve credentials and turn this record into a builder.
    pub fn into_builder(self) -> Result<AlphaSmsClientBuilder, ConfigurationError> {
        let auth = Auth::from_parts(
            self.login.as_deref(),
            self.password.as_deref(),
            self.key.as_deref(),
        )?;

        let mut builder = AlphaSmsClientBuilder::new(auth);
        if let Some(sender) = self.sender {
            builder = builder.sender(sender);
        }
        if let Some(endpoint) = self.endpoint.filter(|it| !it.trim().is_empty()) {
            builder = builder.endpoint(endpoint);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Ok(builder)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("key", &self.key.as_ref().map(|_| "***"))
            .field("sender", &self.sender)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_record() {
        let config: ClientConfig = serde_json::from_str(
            r#"{ "key": "184452c06ft1e2f548aa18243fb6226h79764563", "sender": "AlphaName" }"#,
        )
        .unwrap();
        assert_eq!(config.sender.as_deref(), Some("AlphaName"));
        assert!(config.login.is_none());

        let builder = config.into_builder().unwrap();
        assert!(matches!(builder.auth(), Auth::ApiKey(_)));
    }

    #[test]
    fn rejects_missing_credentials() {
        let config: ClientConfig = serde_json::from_str(r#"{ "sender": "AlphaName" }"#).unwrap();
        assert_eq!(
            config.into_builder().unwrap_err(),
            ConfigurationError::MissingCredentials
        );
    }

    #[test]
    fn rejects_login_without_password() {
        let config = ClientConfig {
            login: Some("380505550505".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            config.into_builder().unwrap_err(),
            ConfigurationError::IncompleteLoginPassword
        );
    }

    #[test]
    fn zero_timeout_is_rejected_on_build() {
        let config = ClientConfig {
            key: Some("K".to_owned()),
            timeout_secs: Some(0),
            ..Default::default()
        };
        let err = config.into_builder().unwrap().build().err().unwrap();
        assert!(matches!(
            err,
            crate::AlphaSmsError::Configuration(ConfigurationError::ZeroTimeout)
        ));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = ClientConfig {
            login: Some("user".to_owned()),
            password: Some("hunter2".to_owned()),
            key: Some("secret-key".to_owned()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("user"));
    }
}
