//! mantra-translate: the translation service boundary
//!
//! Narration in a non-English language goes through a translation
//! service before anything is spoken. This crate owns that boundary:
//! the `Translator` trait, an HTTP JSON client with retry/backoff and
//! best-effort degradation on malformed payloads, and a static
//! in-memory translator for tests and offline use.

pub mod config;
pub mod error;
pub mod fixed;
pub mod http;

pub use config::{RetryConfig, TranslateConfig};
pub use error::TranslateError;
pub use fixed::StaticTranslator;
pub use http::HttpTranslator;

use async_trait::async_trait;
use mantra_core::{Language, TranslationResult};

/// A service that translates an article title/content pair
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `title` and `content` into `target`
    async fn translate(
        &self,
        title: &str,
        content: &str,
        target: Language,
    ) -> Result<TranslationResult, TranslateError>;

    /// Service name, for diagnostics
    fn name(&self) -> &str;
}
