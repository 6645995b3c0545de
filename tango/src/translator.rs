//! Machine translation provider trait and language-code helpers
//!
//! `MachineTranslator` is the seam between the gateway and whatever answers
//! translation requests: the Azure Translator REST API in production, the
//! deterministic `MockTranslator` in tests.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::{TangoError, TangoResult};

/// Sentinel target meaning "pick the other language of the pair"
pub const AUTO_LANGUAGE: &str = "auto";

static LANGUAGE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("language code pattern is valid")
});

/// Generic trait for translation providers
///
/// All methods are async because real providers sit behind a network call.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Detect the language of `text`
    ///
    /// # Returns
    ///
    /// * `Ok(Some(code))` - The provider's top-ranked language code
    /// * `Ok(None)` - The provider answered but could not name a language
    /// * `Err(TangoError::Provider)` - The call failed or the reply was malformed
    async fn detect_language(&self, text: &str) -> TangoResult<Option<String>>;

    /// Translate `text` from `source_lang` into `target_lang`
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TangoResult<String>;

    /// Name used in logs
    fn provider_name(&self) -> &str;
}

/// Trim a language code and lower-case its primary subtag
///
/// Script and region subtags keep their case, since providers list them
/// as `zh-Hans` or `pt-BR`.
///
/// ```ignore
/// assert_eq!(normalize_language("JA"), "ja");
/// assert_eq!(normalize_language(" zh-Hans "), "zh-Hans");
/// ```
pub fn normalize_language(code: &str) -> String {
    let code = code.trim();
    match code.split_once('-') {
        Some((primary, rest)) => format!("{}-{}", primary.to_lowercase(), rest),
        None => code.to_lowercase(),
    }
}

/// Check that a caller-supplied language code looks like a BCP 47 tag
///
/// Accepts `en`, `ja`, `zh-Hans`, `pt-BR` and the `auto` sentinel.
pub fn validate_language(code: &str) -> TangoResult<()> {
    if code.eq_ignore_ascii_case(AUTO_LANGUAGE) || LANGUAGE_CODE.is_match(code) {
        return Ok(());
    }

    Err(TangoError::Validation(format!(
        "invalid language code: {}",
        code
    )))
}
