//! Deterministic in-memory speech engine
//!
//! Records every call and lets the caller fire terminal events for the
//! current utterance on demand. Used by tests and by the CLI dry-run
//! mode; it behaves like the platform engines it stands in for,
//! including reporting a cancelled utterance as `Interrupted`.

use super::{EngineEvent, EngineFailure, SpeechEngine, Utterance};
use crate::error::VoiceError;
use parking_lot::Mutex;
use tokio::sync::broadcast;

/// A recorded engine call
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Speak(Utterance),
    Pause,
    Resume,
    Cancel,
    SetVolume(f32),
}

/// Scripted speech engine for tests and dry runs
pub struct ScriptedEngine {
    calls: Mutex<Vec<EngineCall>>,
    current: Mutex<Option<Utterance>>,
    paused: Mutex<bool>,
    voice_list: Vec<String>,
    live_volume: bool,
    replayed_pause: bool,
    events: broadcast::Sender<EngineEvent>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            calls: Mutex::new(Vec::new()),
            current: Mutex::new(None),
            paused: Mutex::new(false),
            voice_list: Vec::new(),
            live_volume: false,
            replayed_pause: false,
            events,
        }
    }

    /// Engine that honors live volume changes
    pub fn with_live_volume(mut self) -> Self {
        self.live_volume = true;
        self
    }

    /// Engine whose pause discards progress and replays the utterance
    /// on resume (like the espeak subprocess engine)
    pub fn with_replayed_pause(mut self) -> Self {
        self.replayed_pause = true;
        self
    }

    /// Engine reporting the given voice identifiers
    pub fn with_voices(mut self, voices: Vec<String>) -> Self {
        self.voice_list = voices;
        self
    }

    /// Every call made against this engine, in order
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    /// The utterance currently in flight, if any
    pub fn current_utterance(&self) -> Option<Utterance> {
        self.current.lock().clone()
    }

    /// Finish the current utterance normally
    pub fn complete_current(&self) {
        if let Some(utterance) = self.current.lock().take() {
            let _ = self.events.send(EngineEvent::Ended {
                utterance: utterance.id,
            });
        }
    }

    /// Fail the current utterance with a fatal engine error
    pub fn fail_current(&self, message: impl Into<String>) {
        if let Some(utterance) = self.current.lock().take() {
            let _ = self.events.send(EngineEvent::Failed {
                utterance: utterance.id,
                failure: EngineFailure::Fatal(message.into()),
            });
        }
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().push(call);
    }
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechEngine for ScriptedEngine {
    fn speak(&self, utterance: Utterance) -> Result<(), VoiceError> {
        self.record(EngineCall::Speak(utterance.clone()));
        let id = utterance.id;
        *self.current.lock() = Some(utterance);
        *self.paused.lock() = false;
        let _ = self.events.send(EngineEvent::Started { utterance: id });
        Ok(())
    }

    fn pause(&self) {
        self.record(EngineCall::Pause);
        *self.paused.lock() = true;
    }

    fn resume(&self) {
        self.record(EngineCall::Resume);
        *self.paused.lock() = false;
    }

    fn cancel(&self) {
        self.record(EngineCall::Cancel);
        if let Some(utterance) = self.current.lock().take() {
            let _ = self.events.send(EngineEvent::Failed {
                utterance: utterance.id,
                failure: EngineFailure::Interrupted,
            });
        }
    }

    fn is_speaking(&self) -> bool {
        self.current.lock().is_some() && !*self.paused.lock()
    }

    fn supports_stall_nudge(&self) -> bool {
        !self.replayed_pause
    }

    fn set_volume(&self, volume: f32) -> bool {
        self.record(EngineCall::SetVolume(volume));
        self.live_volume
    }

    fn voices(&self) -> Vec<String> {
        self.voice_list.clone()
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }
}
