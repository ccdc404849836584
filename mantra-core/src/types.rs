//! Narration data model

use crate::language::Language;
use serde::{Deserialize, Serialize};

/// One "Listen" press: an article to narrate in a target language.
/// Immutable once submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrationRequest {
    /// Article title (plain text or HTML)
    pub title: String,

    /// Article body (HTML)
    pub content: String,

    /// Target language
    pub language: Language,
}

impl NarrationRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>, language: Language) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            language,
        }
    }
}

/// Translated title/content pair produced by the translation service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationResult {
    pub title: String,
    pub content: String,
}

/// Playback state of the narration controller.
///
/// Error aborts are not a resting state: the handlers that detect them
/// transition straight back to `Idle`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing queued or speaking
    Idle,
    /// Waiting on the translation service
    Translating,
    /// A chunk is in flight to the speech engine
    Speaking,
    /// Paused mid-chunk; resumable
    Paused,
}

/// Snapshot of controller state for UI consumption
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NarrationStatus {
    pub state: PlaybackState,
    /// Index of the chunk being spoken, -1 when none
    pub chunk_index: i64,
    pub chunk_count: usize,
    pub language: Language,
    pub volume: f32,
}
