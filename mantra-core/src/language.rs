//! Supported narration languages
//!
//! The reader exposes a closed set of languages. Each carries a locale
//! code (what speech engines expect), a bare language prefix (for voice
//! fallback matching), and a human-readable name (what the translation
//! service expects).

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages the narration pipeline can speak
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Portuguese,
    Hindi,
}

impl Language {
    /// Locale code, e.g. "es-ES"
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Spanish => "es-ES",
            Language::French => "fr-FR",
            Language::German => "de-DE",
            Language::Portuguese => "pt-BR",
            Language::Hindi => "hi-IN",
        }
    }

    /// Bare language prefix, e.g. "es"
    pub fn prefix(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Portuguese => "pt",
            Language::Hindi => "hi",
        }
    }

    /// Human-readable name, used in translation requests
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Portuguese => "Portuguese",
            Language::Hindi => "Hindi",
        }
    }

    /// All supported languages, in menu order
    pub fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::Spanish,
            Language::French,
            Language::German,
            Language::Portuguese,
            Language::Hindi,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        for lang in Language::all() {
            if normalized == lang.prefix()
                || normalized == lang.code().to_ascii_lowercase()
                || normalized == lang.display_name().to_ascii_lowercase()
            {
                return Ok(*lang);
            }
        }
        Err(Error::UnsupportedLanguage(s.to_string()))
    }
}
