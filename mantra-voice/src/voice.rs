//! Voice selection
//!
//! Engines report voice identifiers in whatever shape their platform
//! uses ("es-ES", "es", "english-us"). Selection walks a fixed fallback
//! chain: exact locale, then language-family prefix, then English, then
//! the engine default.

use mantra_core::Language;

/// Pick the best available voice for `language`, or None for the
/// engine default.
pub fn select_voice(available: &[String], language: Language) -> Option<String> {
    let locale = language.code().to_ascii_lowercase();
    if let Some(voice) = available
        .iter()
        .find(|v| v.to_ascii_lowercase() == locale)
    {
        return Some(voice.clone());
    }

    if let Some(voice) = find_by_prefix(available, language.prefix()) {
        return Some(voice);
    }

    if language != Language::English {
        if let Some(voice) = find_by_prefix(available, Language::English.prefix()) {
            return Some(voice);
        }
    }

    None
}

fn find_by_prefix(available: &[String], prefix: &str) -> Option<String> {
    available
        .iter()
        .find(|v| {
            let lower = v.to_ascii_lowercase();
            lower == prefix
                || lower.starts_with(&format!("{}-", prefix))
                || lower.starts_with(&format!("{}_", prefix))
        })
        .cloned()
}
