//! The narration state machine
//!
//! `Narrator` owns the whole playback lifecycle: translate, normalize,
//! chunk, then speak chunks one at a time. Every operation and engine
//! event is an explicit synchronous transition handler, so the state
//! machine is unit-testable without a real engine or network; the async
//! plumbing lives in [`crate::service::NarrationService`].
//!
//! Invariants:
//! - at most one chunk is in flight to the engine at any time;
//! - the chunk index only advances on an utterance's terminal event;
//! - engine events are matched against the current utterance id, which
//!   silently discards events from cancelled or unlock utterances.

use crate::engines::{EngineEvent, EngineFailure, SpeechEngine, Utterance};
use crate::error::VoiceError;
use crate::voice::select_voice;
use mantra_core::text;
use mantra_core::{
    Language, NarrationConfig, NarrationRequest, NarrationStatus, PlaybackState, TranslationResult,
};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// What a `play` call did
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    /// Fresh narration started speaking (no translation needed)
    Started,
    /// A paused narration resumed
    Resumed,
    /// Toggle semantics: play while active stopped the narration
    Stopped,
    /// Translation required; run it and deliver via `translation_ready`
    NeedsTranslation(TranslationTicket),
    /// Normalization produced nothing speakable
    NoText,
    /// A stale translation response was dropped; the narration it
    /// belonged to was stopped or superseded meanwhile
    Discarded,
}

/// Work order for an asynchronous translation round trip.
/// The epoch ties the eventual response to the narration that asked
/// for it; stale responses are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationTicket {
    pub epoch: u64,
    pub title: String,
    pub content: String,
    pub language: Language,
}

/// What an engine event did to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Playback advanced to the chunk at this index
    Advanced(usize),
    /// Narration ran to natural completion
    Finished,
    /// A fatal engine error aborted the narration
    Aborted(String),
    /// Event was stale, benign, or irrelevant in the current state
    Ignored,
}

/// Voice narration controller
pub struct Narrator {
    config: NarrationConfig,
    engine: Arc<dyn SpeechEngine>,
    state: PlaybackState,
    chunks: Vec<String>,
    index: i64,
    epoch: u64,
    volume: f32,
    language: Language,
    cached: Option<(Language, TranslationResult)>,
    next_utterance_id: u64,
    current_utterance: u64,
    muted: bool,
}

impl Narrator {
    /// Create a new narrator. Fails on invalid configuration.
    pub fn new(config: NarrationConfig, engine: Arc<dyn SpeechEngine>) -> Result<Self, VoiceError> {
        config.validate().map_err(VoiceError::Config)?;

        Ok(Self {
            volume: config.volume,
            config,
            engine,
            state: PlaybackState::Idle,
            chunks: Vec::new(),
            index: -1,
            epoch: 0,
            language: Language::English,
            cached: None,
            next_utterance_id: 0,
            current_utterance: 0,
            muted: false,
        })
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn chunk_index(&self) -> i64 {
        self.index
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn cached_translation(&self) -> Option<&TranslationResult> {
        self.cached.as_ref().map(|(_, result)| result)
    }

    pub fn status(&self) -> NarrationStatus {
        NarrationStatus {
            state: self.state,
            chunk_index: self.index,
            chunk_count: self.chunks.len(),
            language: self.language,
            volume: self.volume,
        }
    }

    /// The play control. From `Paused` this resumes; while active it
    /// acts as stop (toggle semantics, kept for compatibility with the
    /// original reader even though it surprises some users); from
    /// `Idle` it starts a fresh narration, going through translation
    /// unless the target is English or the translation is cached.
    pub fn play(&mut self, request: NarrationRequest) -> Result<PlayOutcome, VoiceError> {
        match self.state {
            PlaybackState::Paused => {
                self.engine.resume();
                self.state = PlaybackState::Speaking;
                debug!(index = self.index, "narration resumed");
                Ok(PlayOutcome::Resumed)
            }
            PlaybackState::Speaking | PlaybackState::Translating => {
                self.stop();
                Ok(PlayOutcome::Stopped)
            }
            PlaybackState::Idle => {
                if request.language != self.language {
                    self.cached = None;
                    self.language = request.language;
                }

                if request.language == Language::English {
                    let combined = text::combine(&request.title, &request.content);
                    return self.start_speaking(combined);
                }

                let cached_text = match self.cached {
                    Some((lang, ref result)) if lang == request.language => {
                        Some(text::combine(&result.title, &result.content))
                    }
                    _ => None,
                };
                if let Some(combined) = cached_text {
                    debug!(language = %request.language, "reusing cached translation");
                    return self.start_speaking(combined);
                }

                self.state = PlaybackState::Translating;
                Ok(PlayOutcome::NeedsTranslation(TranslationTicket {
                    epoch: self.epoch,
                    title: request.title,
                    content: request.content,
                    language: request.language,
                }))
            }
        }
    }

    /// Deliver a translation response. Discarded when the epoch is
    /// stale (a stop or language change happened meanwhile).
    pub fn translation_ready(
        &mut self,
        epoch: u64,
        result: TranslationResult,
    ) -> Result<PlayOutcome, VoiceError> {
        if epoch != self.epoch || self.state != PlaybackState::Translating {
            debug!("discarding stale translation response");
            return Ok(PlayOutcome::Discarded);
        }

        let combined = text::combine(&result.title, &result.content);
        self.cached = Some((self.language, result));
        self.start_speaking(combined)
    }

    /// Deliver a translation failure. Returns true when the failure
    /// belongs to the current narration and should be surfaced to the
    /// user.
    pub fn translation_failed(&mut self, epoch: u64, message: &str) -> bool {
        if epoch != self.epoch || self.state != PlaybackState::Translating {
            debug!("discarding stale translation failure");
            return false;
        }

        error!("translation failed: {}", message);
        self.state = PlaybackState::Idle;
        true
    }

    fn start_speaking(&mut self, combined: String) -> Result<PlayOutcome, VoiceError> {
        self.chunks = text::chunk(&combined, self.config.max_chunk_len);
        if self.chunks.is_empty() {
            warn!("no speakable text after normalization");
            self.state = PlaybackState::Idle;
            return Ok(PlayOutcome::NoText);
        }

        // Some platforms only unlock audio when the first utterance is
        // tied to the triggering user gesture. Its events carry an id
        // that never becomes current, so they are ignored.
        if self.config.unlock_utterance {
            let id = self.alloc_utterance_id();
            let unlock = Utterance {
                id,
                text: String::new(),
                voice: None,
                language: self.language,
                rate: self.config.rate,
                pitch: self.config.pitch,
                volume: 0.0,
            };
            if let Err(e) = self.engine.speak(unlock) {
                warn!("audio unlock utterance failed: {}", e);
            }
        }

        self.state = PlaybackState::Speaking;
        self.index = 0;
        self.muted = false;
        if let Err(e) = self.dispatch_current() {
            self.reset_to_idle();
            return Err(e);
        }

        debug!(chunks = self.chunks.len(), "narration started");
        Ok(PlayOutcome::Started)
    }

    fn dispatch_current(&mut self) -> Result<(), VoiceError> {
        let chunk_text = self
            .chunks
            .get(self.index as usize)
            .cloned()
            .ok_or_else(|| VoiceError::Narration("chunk index out of range".to_string()))?;

        let id = self.alloc_utterance_id();
        self.current_utterance = id;

        let voice = select_voice(&self.engine.voices(), self.language);
        let utterance = Utterance {
            id,
            text: chunk_text,
            voice,
            language: self.language,
            rate: self.config.rate,
            pitch: self.config.pitch,
            volume: self.volume,
        };

        trace!(id, index = self.index, "dispatching chunk");
        self.engine.speak(utterance)
    }

    fn alloc_utterance_id(&mut self) -> u64 {
        self.next_utterance_id += 1;
        self.next_utterance_id
    }

    /// Pause the current chunk. Valid only while speaking. An explicit
    /// pause supersedes the mute fallback; the paused state now owns
    /// the engine's silence.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Speaking {
            self.engine.pause();
            self.state = PlaybackState::Paused;
            self.muted = false;
            debug!(index = self.index, "narration paused");
        }
    }

    /// Stop any narration in progress. Idempotent; safe from any
    /// state, including mid-translation. The cancelled utterance's
    /// "interrupted" error is suppressed by id matching.
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Idle {
            return;
        }

        self.engine.cancel();
        self.reset_to_idle();
        self.cached = None;
        debug!("narration stopped");
    }

    fn reset_to_idle(&mut self) {
        self.chunks.clear();
        self.index = -1;
        self.current_utterance = 0;
        self.state = PlaybackState::Idle;
        self.muted = false;
        self.epoch += 1;
    }

    /// Change the target language. Stops any narration in progress and
    /// drops the cached translation; the next play re-translates.
    pub fn set_language(&mut self, language: Language) {
        if self.state != PlaybackState::Idle {
            self.stop();
        }
        self.cached = None;
        self.language = language;
    }

    /// Change the volume, clamped to [0,1]. Applied live when the
    /// engine supports it; otherwise volume zero pauses the engine
    /// without changing playback state, and raising it resumes.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.volume = volume;

        if self.state != PlaybackState::Speaking && self.state != PlaybackState::Paused {
            return;
        }

        if self.engine.set_volume(volume) {
            return;
        }

        // Mute fallback: silence without losing playback position.
        // Both directions apply only while logically Speaking; from
        // Paused the engine must stay silent whatever the volume.
        if volume == 0.0 && self.state == PlaybackState::Speaking && !self.muted {
            self.engine.pause();
            self.muted = true;
        } else if volume > 0.0 && self.muted && self.state == PlaybackState::Speaking {
            self.engine.resume();
            self.muted = false;
        }
    }

    /// React to an engine event. Events whose utterance id is not the
    /// current one are stale (cancelled utterances, the audio unlock)
    /// and are dropped.
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> EventOutcome {
        match event {
            EngineEvent::Started { utterance } if utterance == self.current_utterance => {
                trace!(id = utterance, "utterance started");
                EventOutcome::Ignored
            }
            EngineEvent::Ended { utterance }
                if utterance == self.current_utterance
                    && self.state == PlaybackState::Speaking =>
            {
                let next = self.index + 1;
                if (next as usize) < self.chunks.len() {
                    self.index = next;
                    match self.dispatch_current() {
                        Ok(()) => EventOutcome::Advanced(next as usize),
                        Err(e) => {
                            error!("failed to dispatch next chunk: {}", e);
                            self.engine.cancel();
                            self.reset_to_idle();
                            EventOutcome::Aborted(e.to_string())
                        }
                    }
                } else {
                    debug!("narration complete");
                    self.chunks.clear();
                    self.index = -1;
                    self.current_utterance = 0;
                    self.state = PlaybackState::Idle;
                    EventOutcome::Finished
                }
            }
            EngineEvent::Failed { utterance, failure } if utterance == self.current_utterance => {
                match failure {
                    EngineFailure::Interrupted => {
                        // Expected from our own cancel/transition logic
                        trace!(id = utterance, "interrupted utterance suppressed");
                        EventOutcome::Ignored
                    }
                    EngineFailure::Fatal(message) => {
                        error!("speech engine error: {}", message);
                        self.engine.cancel();
                        self.reset_to_idle();
                        EventOutcome::Aborted(message)
                    }
                }
            }
            _ => {
                trace!("stale engine event dropped");
                EventOutcome::Ignored
            }
        }
    }

    /// Liveness nudge for engines that stall under continuous speech:
    /// a pause/resume cycle un-sticks their internal timer. Never
    /// changes playback state or the chunk index. Skipped for engines
    /// whose pause replays the utterance from the start; nudging those
    /// would re-speak the chunk every interval and a chunk longer than
    /// the interval would never finish.
    pub fn watchdog_tick(&self) {
        if self.state == PlaybackState::Speaking
            && !self.muted
            && self.engine.supports_stall_nudge()
            && self.engine.is_speaking()
        {
            trace!("watchdog nudging engine");
            self.engine.pause();
            self.engine.resume();
        }
    }
}
