//! mantra-voice: the voice narration controller
//!
//! Turns a translated, normalized article into sequential speech:
//! - `SpeechEngine` trait and implementations (espeak subprocess,
//!   scripted in-memory engine)
//! - Voice selection with locale fallback
//! - `Narrator`, the playback state machine
//! - `NarrationService`, the async wrapper with translation plumbing
//!   and the stall watchdog

pub mod engines;
pub mod error;
pub mod narrator;
pub mod service;
pub mod voice;

pub use engines::espeak::EspeakEngine;
pub use engines::scripted::ScriptedEngine;
pub use engines::{EngineEvent, EngineFailure, SpeechEngine, Utterance};
pub use error::VoiceError;
pub use narrator::{EventOutcome, Narrator, PlayOutcome, TranslationTicket};
pub use service::{NarrationEvent, NarrationService};
pub use voice::select_voice;
