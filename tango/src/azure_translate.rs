//! Azure Translator (v3) provider
//!
//! Talks to the `detect` and `translate` endpoints of the Azure Translator
//! REST API.
//!
//! # Authentication
//!
//! Every request carries the subscription key and region from
//! [`TranslatorConfig`], plus a fresh `X-ClientTraceId` so a single call can
//! be found in the provider's logs.
//!
//! # Example
//!
//! ```ignore
//! use tango::{AzureTranslator, MachineTranslator, TranslatorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = AzureTranslator::new(TranslatorConfig::from_env()?)?;
//!
//!     let lang = provider.detect_language("こんにちは").await?;
//!     println!("{:?}", lang); // Some("ja")
//!
//!     let result = provider.translate("こんにちは", "ja", "en").await?;
//!     println!("{}", result); // "Hello"
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use crate::config::TranslatorConfig;
use crate::error::{TangoError, TangoResult};
use crate::translator::MachineTranslator;

const API_VERSION: &str = "3.0";

/// Azure Translator provider
///
/// Holds only the config and a pooled HTTP client, so it can be shared
/// across concurrent requests behind an `Arc`.
#[derive(Clone)]
pub struct AzureTranslator {
    config: TranslatorConfig,
    client: reqwest::Client,
}

impl AzureTranslator {
    /// Create a provider from a loaded configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(TangoError)` - If the HTTP client cannot be built
    pub fn new(config: TranslatorConfig) -> TangoResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TangoError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> TangoResult<Url> {
        let mut query = vec![("api-version", API_VERSION)];
        query.extend_from_slice(params);

        Url::parse_with_params(&format!("{}/{}", self.config.endpoint, path), &query)
            .map_err(|e| TangoError::Config(format!("Invalid provider endpoint: {}", e)))
    }

    /// POST a single-text body and return the parsed JSON reply
    async fn post(&self, url: Url, text: &str) -> TangoResult<Value> {
        let trace_id = Uuid::new_v4().to_string();
        debug!(%url, %trace_id, "calling translation provider");

        let response = self
            .client
            .post(url)
            .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
            .header("Ocp-Apim-Subscription-Region", &self.config.region)
            .header("X-ClientTraceId", &trace_id)
            .json(&json!([{ "Text": text }]))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TangoError::Provider(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| TangoError::Provider(format!("Failed to parse API response: {}", e)))
    }
}

/// Pull the top-ranked language out of a `detect` reply
///
/// An empty language string means the provider could not decide.
fn parse_detection(json: &Value) -> TangoResult<Option<String>> {
    let language = json[0]["language"].as_str().ok_or_else(|| {
        TangoError::Provider("Invalid API response: missing '[0].language' field".to_string())
    })?;

    Ok(Some(language.trim().to_string()).filter(|l| !l.is_empty()))
}

/// Pull the translated text out of a `translate` reply
fn parse_translation(json: &Value) -> TangoResult<String> {
    json[0]["translations"][0]["text"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| {
            TangoError::Provider(
                "Invalid API response: missing '[0].translations[0].text' field".to_string(),
            )
        })
}

impl std::fmt::Debug for AzureTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureTranslator")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for AzureTranslator {
    async fn detect_language(&self, text: &str) -> TangoResult<Option<String>> {
        let url = self.url("detect", &[])?;
        let json = self.post(url, text).await?;
        parse_detection(&json)
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TangoResult<String> {
        let url = self.url("translate", &[("from", source_lang), ("to", target_lang)])?;
        let json = self.post(url, text).await?;
        parse_translation(&json)
    }

    fn provider_name(&self) -> &str {
        "Azure Translator"
    }
}
