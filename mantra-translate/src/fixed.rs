//! Static in-memory translator
//!
//! Serves canned translations per language. Used by tests and by the
//! CLI when no translation endpoint is configured.

use crate::error::TranslateError;
use crate::Translator;
use async_trait::async_trait;
use mantra_core::{Language, TranslationResult};
use std::collections::HashMap;

/// Translator backed by a fixed per-language table
#[derive(Default)]
pub struct StaticTranslator {
    entries: HashMap<Language, TranslationResult>,
    fail_with: Option<String>,
}

impl StaticTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned translation for `language`
    pub fn with_translation(
        mut self,
        language: Language,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            language,
            TranslationResult {
                title: title.into(),
                content: content.into(),
            },
        );
        self
    }

    /// A translator that fails every request, for exercising the error path
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            fail_with: Some(message.into()),
        }
    }
}

#[async_trait]
impl Translator for StaticTranslator {
    async fn translate(
        &self,
        _title: &str,
        _content: &str,
        target: Language,
    ) -> Result<TranslationResult, TranslateError> {
        if let Some(ref message) = self.fail_with {
            return Err(TranslateError::Api(message.clone()));
        }

        self.entries.get(&target).cloned().ok_or_else(|| {
            TranslateError::Api(format!("no translation registered for {}", target))
        })
    }

    fn name(&self) -> &str {
        "static"
    }
}
