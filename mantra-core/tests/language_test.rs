//! Tests for the supported language set

use mantra_core::Language;
use std::str::FromStr;

#[test]
fn test_parse_prefix() {
    assert_eq!(Language::from_str("es").unwrap(), Language::Spanish);
    assert_eq!(Language::from_str("en").unwrap(), Language::English);
}

#[test]
fn test_parse_locale_code() {
    assert_eq!(Language::from_str("pt-BR").unwrap(), Language::Portuguese);
    assert_eq!(Language::from_str("hi-in").unwrap(), Language::Hindi);
}

#[test]
fn test_parse_display_name() {
    assert_eq!(Language::from_str("French").unwrap(), Language::French);
    assert_eq!(Language::from_str("german").unwrap(), Language::German);
}

#[test]
fn test_parse_unsupported() {
    assert!(Language::from_str("klingon").is_err());
    assert!(Language::from_str("").is_err());
}

#[test]
fn test_codes_and_prefixes_agree() {
    for lang in Language::all() {
        assert!(lang.code().to_ascii_lowercase().starts_with(lang.prefix()));
    }
}

#[test]
fn test_display_is_code() {
    assert_eq!(Language::Spanish.to_string(), "es-ES");
}
