//! Voice selection fallback chain

use mantra_core::Language;
use mantra_voice::select_voice;

fn voices(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_exact_locale_wins() {
    let available = voices(&["en-US", "es-MX", "es-ES", "fr-FR"]);
    assert_eq!(
        select_voice(&available, Language::Spanish),
        Some("es-ES".to_string())
    );
}

#[test]
fn test_exact_match_is_case_insensitive() {
    let available = voices(&["ES-es", "en-us"]);
    assert_eq!(
        select_voice(&available, Language::Spanish),
        Some("ES-es".to_string())
    );
}

#[test]
fn test_prefix_fallback() {
    // No es-ES, but a sibling Spanish locale exists
    let available = voices(&["en-US", "es-MX", "fr-FR"]);
    assert_eq!(
        select_voice(&available, Language::Spanish),
        Some("es-MX".to_string())
    );
}

#[test]
fn test_bare_prefix_matches() {
    let available = voices(&["en", "es", "fr"]);
    assert_eq!(
        select_voice(&available, Language::German),
        Some("en".to_string()),
        "no German voice, English prefix fallback"
    );
    assert_eq!(
        select_voice(&available, Language::French),
        Some("fr".to_string())
    );
}

#[test]
fn test_underscore_separator_matches() {
    let available = voices(&["pt_BR", "en_GB"]);
    assert_eq!(
        select_voice(&available, Language::Portuguese),
        Some("pt_BR".to_string())
    );
}

#[test]
fn test_english_fallback_when_language_missing() {
    let available = voices(&["en-GB", "fr-FR"]);
    assert_eq!(
        select_voice(&available, Language::Hindi),
        Some("en-GB".to_string())
    );
}

#[test]
fn test_engine_default_when_nothing_matches() {
    let available = voices(&["ja-JP", "ko-KR"]);
    assert_eq!(select_voice(&available, Language::German), None);
}

#[test]
fn test_empty_voice_list() {
    assert_eq!(select_voice(&[], Language::English), None);
}

#[test]
fn test_prefix_does_not_match_inside_longer_code() {
    // "esperanto" must not satisfy the "es" prefix rule
    let available = voices(&["esperanto", "en-US"]);
    assert_eq!(
        select_voice(&available, Language::Spanish),
        Some("en-US".to_string())
    );
}
