//! Speech engine implementations
//!
//! A speech engine is a single-stream ambient resource: it plays one
//! utterance at a time and reports progress through start/end/error
//! events. The narration controller never assumes an utterance was
//! spoken; it reacts to the engine's terminal events only.

pub mod espeak;
pub mod scripted;

use crate::error::VoiceError;
use mantra_core::Language;
use tokio::sync::broadcast;

/// One discrete unit of text submitted to a speech engine
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Controller-assigned id; events are matched against it
    pub id: u64,
    pub text: String,
    /// Engine voice identifier; None means engine default
    pub voice: Option<String>,
    pub language: Language,
    /// Words per minute
    pub rate: u32,
    /// -1.0 to 1.0
    pub pitch: f32,
    /// 0.0 to 1.0
    pub volume: f32,
}

/// How an utterance failed
#[derive(Debug, Clone, PartialEq)]
pub enum EngineFailure {
    /// The utterance was cancelled on purpose. Expected from stop and
    /// chunk transitions; always benign.
    Interrupted,
    /// Anything else; fatal to the current narration
    Fatal(String),
}

/// Engine progress events, tagged with the utterance id
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Started { utterance: u64 },
    Ended { utterance: u64 },
    Failed { utterance: u64, failure: EngineFailure },
}

/// Trait for speech engines
pub trait SpeechEngine: Send + Sync {
    /// Dispatch an utterance. Asynchronous: completion is reported via
    /// the event channel, never inline.
    fn speak(&self, utterance: Utterance) -> Result<(), VoiceError>;

    /// Pause the in-flight utterance
    fn pause(&self);

    /// Resume a paused utterance
    fn resume(&self);

    /// Cancel the in-flight utterance and clear any engine queue.
    /// Engines report the cancelled utterance as `Interrupted`.
    fn cancel(&self);

    /// Whether an utterance is actively being spoken
    fn is_speaking(&self) -> bool;

    /// Whether a pause/resume cycle is a safe liveness nudge. Engines
    /// whose pause discards synthesis progress and replays the
    /// utterance from the start must return false, or the nudge would
    /// re-speak (and on long chunks never finish) the current chunk.
    fn supports_stall_nudge(&self) -> bool;

    /// Apply volume to the in-flight utterance. Returns false when the
    /// engine cannot change volume mid-utterance; callers fall back to
    /// pausing at volume zero.
    fn set_volume(&self, volume: f32) -> bool;

    /// Available voice identifiers
    fn voices(&self) -> Vec<String>;

    /// Check if engine is available
    fn is_available(&self) -> bool;

    /// Engine name
    fn name(&self) -> &str;

    /// Subscribe to engine events
    fn subscribe(&self) -> broadcast::Receiver<EngineEvent>;
}
