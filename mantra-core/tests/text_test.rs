//! Tests for the text pipeline: normalization, sentence splitting, chunking

use mantra_core::text::{chunk, combine, normalize, split_sentences};

#[test]
fn test_normalize_strips_tags() {
    assert_eq!(
        normalize("<p>Hello <strong>world</strong></p>"),
        "Hello world"
    );
}

#[test]
fn test_normalize_decodes_entities() {
    assert_eq!(normalize("fish &amp; chips"), "fish and chips");
    assert_eq!(normalize("caf&eacute;"), "café");
}

#[test]
fn test_normalize_rewrites_percent() {
    assert_eq!(normalize("50% done"), "50 percent done");
}

#[test]
fn test_normalize_rewrites_decimal_point() {
    assert_eq!(normalize("Rate is 3.5."), "Rate is 3 point 5.");
}

#[test]
fn test_normalize_removes_quotes() {
    assert_eq!(normalize("she said \u{201C}hi\u{201D} and \"bye\""), "she said hi and bye");
}

#[test]
fn test_normalize_rewrites_hash() {
    assert_eq!(normalize("#goals for today"), "hashtag goals for today");
}

#[test]
fn test_normalize_collapses_whitespace() {
    assert_eq!(normalize("a\n\n  b\t c"), "a b c");
}

#[test]
fn test_normalize_keeps_apostrophes() {
    // Stripping apostrophes would mangle contractions
    assert_eq!(normalize("don't stop"), "don't stop");
}

#[test]
fn test_combine_title_first_with_full_stop() {
    assert_eq!(
        combine("Hello World", "This is a test. It has two sentences."),
        "Hello World. This is a test. It has two sentences."
    );
}

#[test]
fn test_combine_title_already_terminated() {
    assert_eq!(combine("Really?", "Yes."), "Really? Yes.");
}

#[test]
fn test_combine_empty_title() {
    assert_eq!(combine("", "Body only."), "Body only.");
}

#[test]
fn test_combine_empty_body() {
    assert_eq!(combine("Title only", ""), "Title only");
}

#[test]
fn test_combine_markup_scenario() {
    // Tags stripped, % and decimal point rewritten
    assert_eq!(
        combine("T", "<p>50% done. Rate is 3.5.</p>"),
        "T. 50 percent done. Rate is 3 point 5."
    );
}

#[test]
fn test_split_sentences_basic() {
    assert_eq!(
        split_sentences("One. Two! Three?"),
        vec!["One.", "Two!", "Three?"]
    );
}

#[test]
fn test_split_sentences_trailing_partial() {
    assert_eq!(
        split_sentences("Done. And then"),
        vec!["Done.", "And then"]
    );
}

#[test]
fn test_split_sentences_empty() {
    assert!(split_sentences("").is_empty());
    assert!(split_sentences("   ").is_empty());
}

#[test]
fn test_chunk_single_small_text() {
    let text = "Hello World. This is a test. It has two sentences.";
    let chunks = chunk(text, 160);
    assert_eq!(chunks, vec![text.to_string()]);
}

#[test]
fn test_chunk_respects_max_len() {
    let text = "Alpha beta gamma. Delta epsilon zeta. Eta theta iota.";
    let chunks = chunk(text, 20);
    assert!(chunks.len() > 1);
    for c in &chunks {
        assert!(c.chars().count() <= 20, "chunk too long: {:?}", c);
    }
}

#[test]
fn test_chunk_preserves_order() {
    let text = "First sentence here. Second sentence here. Third sentence here.";
    let chunks = chunk(text, 25);
    let rejoined = chunks.join(" ");
    assert_eq!(rejoined, text);
}

#[test]
fn test_chunk_hard_splits_long_sentence_on_word_boundaries() {
    let text = "one two three four five six seven eight nine ten";
    let chunks = chunk(text, 20);
    for c in &chunks {
        assert!(c.chars().count() <= 20);
        // No word was cut: every piece of every chunk is a whole input word
        for word in c.split_whitespace() {
            assert!(text.split_whitespace().any(|w| w == word));
        }
    }
    assert_eq!(chunks.join(" "), text);
}

#[test]
fn test_chunk_lone_oversized_word() {
    let word = "a".repeat(50);
    let chunks = chunk(&word, 20);
    // Cannot split mid-token; the word survives as its own chunk
    assert_eq!(chunks, vec![word]);
}

#[test]
fn test_chunk_discards_empty() {
    assert!(chunk("", 160).is_empty());
    assert!(chunk("   ", 160).is_empty());
}

#[test]
fn test_chunk_no_empty_chunks_from_punctuation_runs() {
    let chunks = chunk("Wait... what?", 160);
    assert!(chunks.iter().all(|c| !c.trim().is_empty()));
}
