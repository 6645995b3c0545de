//! Vocabulary store and translation gateway for the tango flashcard backend
//!
//! Words are translated through an external provider and kept in a local
//! SQLite table together with a "known" flag the learner flips while
//! reviewing.
//!
//! # Workflow Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tango::{AzureTranslator, NewWord, TranslationGateway, TranslatorConfig, WordStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Open the store (creates the table on first run)
//!     let store = WordStore::open("words.db".as_ref())?;
//!
//!     // 2. Translate, letting the gateway pick both languages
//!     let provider = AzureTranslator::new(TranslatorConfig::from_env()?)?;
//!     let gateway = TranslationGateway::new(Arc::new(provider));
//!     let translation = gateway.translate("こんにちは", None, None).await?;
//!
//!     // 3. Save the pair for later review
//!     let id = store.create(&NewWord {
//!         source_text: "こんにちは".to_string(),
//!         translated_text: translation.translated_text,
//!         source_lang: translation.source_language,
//!         target_lang: translation.target_language,
//!     })?;
//!
//!     // 4. Mark it as learned
//!     store.update_known(id, true)?;
//!     Ok(())
//! }
//! ```

pub mod azure_translate;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod store;
pub mod translator;

// Re-export main types for convenient access
pub use azure_translate::AzureTranslator;
pub use config::TranslatorConfig;
pub use error::{TangoError, TangoResult};
pub use gateway::{Translation, TranslationGateway, resolve_target};
pub use mock::{MockDetection, MockMode, MockTranslator};
pub use store::{NewWord, WordEntry, WordStore};
pub use translator::MachineTranslator;
