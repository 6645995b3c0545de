//! Provider configuration loaded once at process start
//!
//! The three Azure Translator settings are read from the environment
//! (after `.env` has been applied by the binary) and handed to the
//! provider constructor. Nothing reads them again afterwards.

use crate::error::{TangoError, TangoResult};

/// Environment variable holding the provider subscription key
pub const API_KEY_VAR: &str = "AZURE_API_KEY";
/// Environment variable holding the provider base URL
pub const ENDPOINT_VAR: &str = "AZURE_ENDPOINT";
/// Environment variable holding the provider region
pub const REGION_VAR: &str = "AZURE_LOCATION";

/// Credentials and endpoint for the translation provider
#[derive(Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    pub api_key: String,
    pub endpoint: String,
    pub region: String,
}

impl TranslatorConfig {
    /// Build a config from explicit values, rejecting blank ones
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        region: impl Into<String>,
    ) -> TangoResult<Self> {
        let config = Self {
            api_key: api_key.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            region: region.into(),
        };

        for (name, value) in [
            (API_KEY_VAR, &config.api_key),
            (ENDPOINT_VAR, &config.endpoint),
            (REGION_VAR, &config.region),
        ] {
            if value.trim().is_empty() {
                return Err(TangoError::Config(format!("{} cannot be empty", name)));
            }
        }

        Ok(config)
    }

    /// Read all three settings from the environment
    ///
    /// Every missing variable is named in the error so an operator can fix
    /// them in one go.
    pub fn from_env() -> TangoResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TangoResult<Self> {
        let missing: Vec<&str> = [API_KEY_VAR, ENDPOINT_VAR, REGION_VAR]
            .into_iter()
            .filter(|&name| lookup(name).is_none_or(|v| v.trim().is_empty()))
            .collect();

        if !missing.is_empty() {
            return Err(TangoError::Config(format!(
                "environment variables not set: {}",
                missing.join(", ")
            )));
        }

        Self::new(
            lookup(API_KEY_VAR).unwrap_or_default(),
            lookup(ENDPOINT_VAR).unwrap_or_default(),
            lookup(REGION_VAR).unwrap_or_default(),
        )
    }
}

impl std::fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("api_key", &"***")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .finish()
    }
}
