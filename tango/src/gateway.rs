//! Translation gateway: language resolution in front of a provider
//!
//! The learner works with a Japanese/English pair, so a missing or `auto`
//! target always means "the other one": Japanese input goes to English,
//! everything else goes to Japanese.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{TangoError, TangoResult};
use crate::translator::{AUTO_LANGUAGE, MachineTranslator, normalize_language, validate_language};

/// Source language assumed when detection names nothing
pub const FALLBACK_SOURCE: &str = "en";

/// Outcome of a translation with the languages actually used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub source_language: String,
    pub target_language: String,
    pub translated_text: String,
}

/// Stateless wrapper around a shared provider
#[derive(Clone)]
pub struct TranslationGateway {
    translator: Arc<dyn MachineTranslator>,
}

impl TranslationGateway {
    pub fn new(translator: Arc<dyn MachineTranslator>) -> Self {
        Self { translator }
    }

    pub fn provider_name(&self) -> &str {
        self.translator.provider_name()
    }

    /// Top-ranked language of `text`, if the provider names one
    pub async fn detect_language(&self, text: &str) -> TangoResult<Option<String>> {
        self.translator.detect_language(text).await
    }

    /// Translate `text`, filling in whichever languages were not given
    ///
    /// Empty strings count as "not given". The resolved codes are returned
    /// alongside the translated text. Nothing is persisted.
    pub async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: Option<&str>,
    ) -> TangoResult<Translation> {
        if text.trim().is_empty() {
            return Err(TangoError::Validation("text is required".to_string()));
        }

        let source = source.map(str::trim).filter(|s| !s.is_empty());
        let target = target.map(str::trim).filter(|t| !t.is_empty());
        if let Some(code) = source {
            validate_language(code)?;
        }
        if let Some(code) = target {
            validate_language(code)?;
        }

        let source_language = match source {
            Some(code) if !code.eq_ignore_ascii_case(AUTO_LANGUAGE) => normalize_language(code),
            _ => {
                let detected = self.detect_language(text).await?;
                debug!(?detected, "source language detected");
                detected
                    .map(|code| normalize_language(&code))
                    .unwrap_or_else(|| FALLBACK_SOURCE.to_string())
            }
        };
        let target_language = resolve_target(&source_language, target);

        let translated_text = self
            .translator
            .translate(text, &source_language, &target_language)
            .await?;

        info!(
            provider = self.provider_name(),
            from = %source_language,
            to = %target_language,
            "translated text"
        );

        Ok(Translation {
            source_language,
            target_language,
            translated_text,
        })
    }
}

/// Pick the target language for a resolved source
///
/// An explicit target wins unless it is the `auto` sentinel.
pub fn resolve_target(source_language: &str, target: Option<&str>) -> String {
    match target {
        Some(code) if !code.is_empty() && !code.eq_ignore_ascii_case(AUTO_LANGUAGE) => {
            normalize_language(code)
        }
        _ if source_language == "ja" => "en".to_string(),
        _ => "ja".to_string(),
    }
}

impl std::fmt::Debug for TranslationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationGateway")
            .field("provider", &self.provider_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDetection, MockMode, MockTranslator};

    fn gateway(mock: MockTranslator) -> TranslationGateway {
        TranslationGateway::new(Arc::new(mock))
    }

    #[test]
    fn test_resolve_target_pairs() {
        assert_eq!(resolve_target("ja", None), "en");
        assert_eq!(resolve_target("en", None), "ja");
        assert_eq!(resolve_target("fr", None), "ja");
        assert_eq!(resolve_target("ja", Some("auto")), "en");
        assert_eq!(resolve_target("en", Some("")), "ja");
        assert_eq!(resolve_target("en", Some("DE")), "de");
    }

    #[tokio::test]
    async fn test_japanese_goes_to_english() {
        let gw = gateway(MockTranslator::with_mappings(&[("こんにちは", "en", "Hello")]));
        let result = gw.translate("こんにちは", None, None).await.unwrap();
        assert_eq!(
            result,
            Translation {
                source_language: "ja".to_string(),
                target_language: "en".to_string(),
                translated_text: "Hello".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_auto_target_from_english() {
        let gw = gateway(MockTranslator::new(MockMode::Suffix));
        let result = gw.translate("hello", None, Some("auto")).await.unwrap();
        assert_eq!(result.source_language, "en");
        assert_eq!(result.target_language, "ja");
        assert_eq!(result.translated_text, "hello_ja");
    }

    #[tokio::test]
    async fn test_explicit_languages_skip_detection() {
        // Detection would report "xx" if it were consulted
        let mock = MockTranslator::new(MockMode::Suffix)
            .with_detection(MockDetection::Fixed("xx".to_string()));
        let result = gateway(mock)
            .translate("bonjour", Some("fr"), Some("en"))
            .await
            .unwrap();
        assert_eq!(result.source_language, "fr");
        assert_eq!(result.target_language, "en");
    }

    #[tokio::test]
    async fn test_explicit_source_with_auto_target() {
        let gw = gateway(MockTranslator::new(MockMode::Suffix));
        let result = gw.translate("猫", Some("ja"), Some("auto")).await.unwrap();
        assert_eq!(result.target_language, "en");
    }

    #[tokio::test]
    async fn test_empty_source_triggers_detection() {
        let gw = gateway(MockTranslator::new(MockMode::Suffix));
        let result = gw.translate("ねこ", Some(""), None).await.unwrap();
        assert_eq!(result.source_language, "ja");
        assert_eq!(result.target_language, "en");
    }

    #[tokio::test]
    async fn test_nothing_detected_falls_back_to_english() {
        let mock = MockTranslator::new(MockMode::Suffix).with_detection(MockDetection::Nothing);
        let result = gateway(mock).translate("???", None, None).await.unwrap();
        assert_eq!(result.source_language, "en");
        assert_eq!(result.target_language, "ja");
    }

    #[tokio::test]
    async fn test_empty_text_is_validation_error() {
        let gw = gateway(MockTranslator::new(MockMode::Suffix));
        assert!(matches!(
            gw.translate("", None, None).await,
            Err(TangoError::Validation(_))
        ));
        assert!(matches!(
            gw.translate("   ", None, None).await,
            Err(TangoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_language_is_validation_error() {
        let gw = gateway(MockTranslator::new(MockMode::Suffix));
        assert!(matches!(
            gw.translate("hello", Some("en&to=fr"), None).await,
            Err(TangoError::Validation(_))
        ));
        assert!(matches!(
            gw.translate("hello", None, Some("not a code")).await,
            Err(TangoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let gw = gateway(MockTranslator::new(MockMode::Error("HTTP 503".to_string())));
        assert!(matches!(
            gw.translate("hello", None, None).await,
            Err(TangoError::Provider(_))
        ));
        assert!(matches!(
            gw.translate("hello", Some("en"), Some("ja")).await,
            Err(TangoError::Provider(_))
        ));
    }
}
