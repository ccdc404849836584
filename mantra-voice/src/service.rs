//! Async facade over the narration state machine
//!
//! `NarrationService` wires the synchronous [`Narrator`] into a tokio
//! runtime: it pumps engine events into the state machine, runs
//! translation requests off the caller's thread with epoch-guarded
//! delivery, owns the stall watchdog task, and re-broadcasts UI-facing
//! narration events.

use crate::engines::{EngineEvent, SpeechEngine};
use crate::error::VoiceError;
use crate::narrator::{EventOutcome, Narrator, PlayOutcome};
use mantra_core::{Language, NarrationConfig, NarrationRequest, NarrationStatus, PlaybackState};
use mantra_translate::Translator;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// UI-facing narration events
#[derive(Debug, Clone, PartialEq)]
pub enum NarrationEvent {
    /// Speaking began (after any translation round trip)
    Started,
    /// Playback advanced to the chunk at this index
    ChunkAdvanced(usize),
    /// Narration ran to natural completion
    Finished,
    /// Narration was stopped explicitly
    Stopped,
    /// The article (or its translation) normalized to nothing
    /// speakable; nothing was dispatched
    NoText,
    /// The translation request failed; show the user an error
    TranslationFailed(String),
    /// A fatal engine error ended the narration
    Aborted(String),
}

const EVENT_BUFFER_SIZE: usize = 64;

/// Shared handles the background tasks need
#[derive(Clone)]
struct ServiceCtx {
    narrator: Arc<Mutex<Narrator>>,
    events: broadcast::Sender<NarrationEvent>,
    watchdog: Arc<RwLock<Option<JoinHandle<()>>>>,
    watchdog_interval: Duration,
}

impl ServiceCtx {
    fn on_engine_event(&self, event: EngineEvent) {
        let outcome = self.narrator.lock().handle_engine_event(event);
        match outcome {
            EventOutcome::Advanced(index) => {
                let _ = self.events.send(NarrationEvent::ChunkAdvanced(index));
            }
            EventOutcome::Finished => {
                let _ = self.events.send(NarrationEvent::Finished);
                self.sync_watchdog();
            }
            EventOutcome::Aborted(message) => {
                let _ = self.events.send(NarrationEvent::Aborted(message));
                self.sync_watchdog();
            }
            EventOutcome::Ignored => {}
        }
    }

    /// Keep the watchdog task's lifetime tied to the Speaking state:
    /// spawned on entering it, aborted on leaving it.
    fn sync_watchdog(&self) {
        let speaking = self.narrator.lock().state() == PlaybackState::Speaking;
        let mut guard = self.watchdog.write();

        if speaking {
            if guard.is_none() {
                let ctx = self.clone();
                let interval = self.watchdog_interval;
                *guard = Some(tokio::spawn(async move {
                    let mut ticker = tokio::time::interval(interval);
                    // the first tick fires immediately
                    ticker.tick().await;
                    loop {
                        ticker.tick().await;
                        ctx.narrator.lock().watchdog_tick();
                    }
                }));
            }
        } else if let Some(handle) = guard.take() {
            handle.abort();
        }
    }
}

/// Narration controller with async plumbing attached
pub struct NarrationService {
    ctx: ServiceCtx,
    engine: Arc<dyn SpeechEngine>,
    translator: Arc<dyn Translator>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl NarrationService {
    /// Create the service and start pumping engine events.
    /// Must be called within a tokio runtime.
    pub fn new(
        config: NarrationConfig,
        engine: Arc<dyn SpeechEngine>,
        translator: Arc<dyn Translator>,
    ) -> Result<Self, VoiceError> {
        if !engine.is_available() {
            return Err(VoiceError::Engine(format!(
                "speech engine '{}' not available",
                engine.name()
            )));
        }

        let watchdog_interval = Duration::from_secs(config.watchdog_interval_secs);
        let narrator = Narrator::new(config, engine.clone())?;
        let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);

        let ctx = ServiceCtx {
            narrator: Arc::new(Mutex::new(narrator)),
            events,
            watchdog: Arc::new(RwLock::new(None)),
            watchdog_interval,
        };

        let mut rx = engine.subscribe();
        let pump_ctx = ctx.clone();
        let pump = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => pump_ctx.on_engine_event(event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("engine event stream lagged, skipped {} events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        info!("narration service started (engine: {})", engine.name());
        Ok(Self {
            ctx,
            engine,
            translator,
            pump: Mutex::new(Some(pump)),
        })
    }

    /// The play control: resume when paused, stop when active, start a
    /// fresh narration otherwise. Translation runs in the background;
    /// stop stays responsive while it is pending.
    pub fn play(&self, request: NarrationRequest) -> Result<(), VoiceError> {
        let outcome = self.ctx.narrator.lock().play(request)?;

        match outcome {
            PlayOutcome::Started => {
                let _ = self.ctx.events.send(NarrationEvent::Started);
            }
            PlayOutcome::Stopped => {
                let _ = self.ctx.events.send(NarrationEvent::Stopped);
            }
            PlayOutcome::NeedsTranslation(ticket) => {
                let ctx = self.ctx.clone();
                let translator = self.translator.clone();
                tokio::spawn(async move {
                    match translator
                        .translate(&ticket.title, &ticket.content, ticket.language)
                        .await
                    {
                        Ok(result) => {
                            let outcome =
                                ctx.narrator.lock().translation_ready(ticket.epoch, result);
                            match outcome {
                                Ok(PlayOutcome::Started) => {
                                    let _ = ctx.events.send(NarrationEvent::Started);
                                }
                                Ok(PlayOutcome::NoText) => {
                                    let _ = ctx.events.send(NarrationEvent::NoText);
                                }
                                Ok(_) => {}
                                Err(e) => {
                                    let _ =
                                        ctx.events.send(NarrationEvent::Aborted(e.to_string()));
                                }
                            }
                            ctx.sync_watchdog();
                        }
                        Err(e) => {
                            let surfaced = ctx
                                .narrator
                                .lock()
                                .translation_failed(ticket.epoch, &e.to_string());
                            if surfaced {
                                let _ = ctx
                                    .events
                                    .send(NarrationEvent::TranslationFailed(e.to_string()));
                            }
                        }
                    }
                });
            }
            PlayOutcome::NoText => {
                let _ = self.ctx.events.send(NarrationEvent::NoText);
            }
            PlayOutcome::Resumed | PlayOutcome::Discarded => {}
        }

        self.ctx.sync_watchdog();
        Ok(())
    }

    pub fn pause(&self) {
        self.ctx.narrator.lock().pause();
        self.ctx.sync_watchdog();
    }

    pub fn stop(&self) {
        let was_active = {
            let mut narrator = self.ctx.narrator.lock();
            let active = narrator.state() != PlaybackState::Idle;
            narrator.stop();
            active
        };
        if was_active {
            let _ = self.ctx.events.send(NarrationEvent::Stopped);
        }
        self.ctx.sync_watchdog();
    }

    pub fn set_language(&self, language: Language) {
        self.ctx.narrator.lock().set_language(language);
        self.ctx.sync_watchdog();
    }

    pub fn set_volume(&self, volume: f32) {
        self.ctx.narrator.lock().set_volume(volume);
    }

    pub fn status(&self) -> NarrationStatus {
        self.ctx.narrator.lock().status()
    }

    /// Subscribe to UI-facing narration events
    pub fn subscribe(&self) -> broadcast::Receiver<NarrationEvent> {
        self.ctx.events.subscribe()
    }

    /// Stop playback and tear down the background tasks
    pub fn shutdown(&self) {
        self.ctx.narrator.lock().stop();
        if let Some(handle) = self.ctx.watchdog.write().take() {
            handle.abort();
        }
        if let Some(handle) = self.pump.lock().take() {
            handle.abort();
        }
        self.engine.cancel();
        info!("narration service stopped");
    }
}

impl Drop for NarrationService {
    fn drop(&mut self) {
        if let Some(handle) = self.ctx.watchdog.write().take() {
            handle.abort();
        }
        if let Some(handle) = self.pump.lock().take() {
            handle.abort();
        }
    }
}
