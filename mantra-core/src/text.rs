//! Text pipeline: turn article HTML into speakable chunks
//!
//! Speech engines are picky. Raw CMS content carries markup, entities,
//! and symbols that engines either skip or mispronounce, and most
//! engines truncate or time out on long utterances. The pipeline here
//! normalizes the text to something an engine reads naturally, then
//! splits it into bounded chunks that are dispatched one at a time.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").expect("tag regex")
});

static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d)\.(\d)").expect("decimal regex")
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("whitespace regex")
});

/// Normalize HTML article text into plain speakable text.
///
/// Decodes entities, strips residual tags, rewrites symbols that speech
/// engines mispronounce or skip, and collapses whitespace. Applied
/// identically to title and body so the two concatenate cleanly.
pub fn normalize(input: &str) -> String {
    let decoded = html_escape::decode_html_entities(input);
    let stripped = TAG_RE.replace_all(&decoded, " ");

    let rewritten = stripped
        .replace('%', " percent")
        .replace('#', " hashtag ")
        .replace('&', " and ")
        .replace(['"', '\u{201C}', '\u{201D}'], "");

    // "3.5" reads as "3 point 5"; a bare period between digits is
    // otherwise treated as a sentence break or skipped entirely.
    let rewritten = DECIMAL_RE.replace_all(&rewritten, "${1} point ${2}");

    WHITESPACE_RE.replace_all(&rewritten, " ").trim().to_string()
}

/// Combine a normalized title and body into one narration text.
/// Title first, then a full stop, then the body.
pub fn combine(title: &str, body: &str) -> String {
    let title = normalize(title);
    let body = normalize(body);

    if title.is_empty() {
        return body;
    }
    if body.is_empty() {
        return title;
    }

    if title.ends_with(['.', '!', '?']) {
        format!("{} {}", title, body)
    } else {
        format!("{}. {}", title, body)
    }
}

/// Split normalized text into sentence-like units.
///
/// Units are terminated by `.`, `!`, or `?` (terminator kept); a final
/// partial unit without a terminator is allowed.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// Split normalized text into speakable chunks of at most `max_len`
/// characters.
///
/// Sentences are accumulated greedily; a sentence that would push the
/// current chunk past the limit starts a new one. A single sentence
/// longer than the limit is hard-split on word boundaries, so no word
/// is ever cut mid-token. A lone word longer than the limit becomes its
/// own over-long chunk. Empty chunks are discarded.
pub fn chunk(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();

        if sentence_len > max_len {
            flush(&mut chunks, &mut current, &mut current_len);
            hard_split(&sentence, max_len, &mut chunks);
            continue;
        }

        // +1 for the joining space
        let candidate_len = if current.is_empty() {
            sentence_len
        } else {
            current_len + 1 + sentence_len
        };

        if candidate_len > max_len {
            flush(&mut chunks, &mut current, &mut current_len);
            current.push_str(&sentence);
            current_len = sentence_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&sentence);
            current_len = candidate_len;
        }
    }

    flush(&mut chunks, &mut current, &mut current_len);
    trace!(chunks = chunks.len(), "chunked narration text");
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String, current_len: &mut usize) {
    if !current.is_empty() {
        chunks.push(std::mem::take(current));
        *current_len = 0;
    }
}

/// Word-boundary split for a single sentence that exceeds the limit
fn hard_split(sentence: &str, max_len: usize, chunks: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in sentence.split_whitespace() {
        let word_len = word.chars().count();
        let candidate_len = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if candidate_len > max_len && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = candidate_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
}
