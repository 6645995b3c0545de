//! Mock translator for testing
//!
//! Deterministic, API-free provider so the gateway and HTTP handlers can be
//! exercised without credentials or network access.
//!
//! # Example
//!
//! ```ignore
//! use tango::{MachineTranslator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", "en", "ja").await.unwrap();
//!     assert_eq!(result, "hello_ja");
//! }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{TangoError, TangoResult};
use crate::translator::MachineTranslator;

/// How the mock produces translations
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target code: "hello" → "hello_ja"
    Suffix,

    /// Predefined `(text, target)` → translation pairs, falling back to `Suffix`
    Mappings(HashMap<(String, String), String>),

    /// Every call fails with a provider error carrying this message
    Error(String),
}

/// How the mock answers language detection
#[derive(Debug, Clone)]
pub enum MockDetection {
    /// Kana or CJK ideographs → "ja", anything else → "en"
    Script,

    /// Always report this code
    Fixed(String),

    /// The provider answers but names no language
    Nothing,
}

/// Mock translator simulating a provider
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    detection: MockDetection,
}

impl MockTranslator {
    /// Create a mock with script-based detection
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            detection: MockDetection::Script,
        }
    }

    /// Replace the detection behaviour
    pub fn with_detection(mut self, detection: MockDetection) -> Self {
        self.detection = detection;
        self
    }

    /// Convenience constructor: mappings mode from a slice of tuples
    ///
    /// ```ignore
    /// let mock = MockTranslator::with_mappings(&[("こんにちは", "en", "Hello")]);
    /// ```
    pub fn with_mappings(entries: &[(&str, &str, &str)]) -> Self {
        let map = entries
            .iter()
            .map(|(text, target, translation)| {
                ((text.to_string(), target.to_string()), translation.to_string())
            })
            .collect();
        Self::new(MockMode::Mappings(map))
    }

    fn fail_if_error_mode(&self) -> TangoResult<()> {
        match &self.mode {
            MockMode::Error(msg) => Err(TangoError::Provider(msg.clone())),
            _ => Ok(()),
        }
    }
}

fn looks_japanese(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{3040}'..='\u{309F}' // hiragana
            | '\u{30A0}'..='\u{30FF}' // katakana
            | '\u{4E00}'..='\u{9FFF}' // CJK unified ideographs
        )
    })
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn detect_language(&self, text: &str) -> TangoResult<Option<String>> {
        self.fail_if_error_mode()?;

        Ok(match &self.detection {
            MockDetection::Script if looks_japanese(text) => Some("ja".to_string()),
            MockDetection::Script => Some("en".to_string()),
            MockDetection::Fixed(code) => Some(code.clone()),
            MockDetection::Nothing => None,
        })
    }

    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> TangoResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target_lang)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target_lang.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target_lang)))
            }
            MockMode::Error(msg) => Err(TangoError::Provider(msg.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
