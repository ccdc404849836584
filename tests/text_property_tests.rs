//! Property tests for the text normalization and chunking pipeline

use mantra_core::text;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_chunks_never_empty(
        input in "[a-zA-Z0-9 .!?%#&]{0,400}",
        max in 20usize..200,
    ) {
        let normalized = text::normalize(&input);
        for chunk in text::chunk(&normalized, max) {
            prop_assert!(!chunk.trim().is_empty());
        }
    }

    #[test]
    fn test_chunk_length_bounded(
        input in "[a-zA-Z0-9 .!?]{0,400}",
        max in 20usize..200,
    ) {
        let normalized = text::normalize(&input);
        for chunk in text::chunk(&normalized, max) {
            // A chunk may only exceed the limit when it is one
            // unbreakable word
            prop_assert!(
                chunk.chars().count() <= max || !chunk.contains(' '),
                "oversized multi-word chunk: {:?}",
                chunk
            );
        }
    }

    #[test]
    fn test_chunking_preserves_content_in_order(
        input in "[a-zA-Z0-9 .!?]{0,400}",
        max in 20usize..200,
    ) {
        let normalized = text::normalize(&input);
        let chunks = text::chunk(&normalized, max);

        let rejoined: String = chunks
            .join(" ")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let original: String = normalized
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        prop_assert_eq!(rejoined, original);
    }

    #[test]
    fn test_normalize_is_idempotent(
        input in "[a-zA-Z0-9 .!?<>/%#&\"]{0,300}",
    ) {
        let once = text::normalize(&input);
        let twice = text::normalize(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn test_normalize_collapses_whitespace(
        input in "[a-zA-Z0-9 \t\n.!?]{0,300}",
    ) {
        let normalized = text::normalize(&input);
        prop_assert!(!normalized.contains("  "));
        prop_assert!(!normalized.starts_with(' '));
        prop_assert!(!normalized.ends_with(' '));
    }

    #[test]
    fn test_sentences_rejoin_to_source(input in "[a-zA-Z0-9 .!?]{0,300}") {
        let normalized = text::normalize(&input);
        let sentences = text::split_sentences(&normalized);

        let rejoined: String = sentences
            .join(" ")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let original: String = normalized
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        prop_assert_eq!(rejoined, original);
    }

    #[test]
    fn test_combine_always_speaks_title_first(
        title in "[a-zA-Z]{1,40}",
        body in "[a-zA-Z ]{1,200}",
    ) {
        let combined = text::combine(&title, &body);
        prop_assert!(combined.starts_with(&text::normalize(&title)));
    }
}
