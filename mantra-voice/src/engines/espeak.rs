//! espeak-ng subprocess engine
//!
//! Spawns one `espeak-ng` (or `espeak`) process per utterance. The
//! engine cannot change volume or truly suspend a running synthesis, so
//! pause kills the child silently and resume replays the same utterance
//! from its start; utterances are short chunks, which keeps the replay
//! unnoticeable. A generation counter keeps reaped children from
//! emitting stale terminal events.

use super::{EngineEvent, EngineFailure, SpeechEngine, Utterance};
use crate::error::VoiceError;
use parking_lot::Mutex;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

const CANDIDATE_BINARIES: &[&str] = &["espeak-ng", "espeak"];
const REAP_POLL_MS: u64 = 50;

/// Text-to-speech via the espeak-ng command line
pub struct EspeakEngine {
    binary: Option<String>,
    voice_list: Vec<String>,
    events: broadcast::Sender<EngineEvent>,
    child: Arc<Mutex<Option<Child>>>,
    current: Arc<Mutex<Option<Utterance>>>,
    paused: Mutex<Option<Utterance>>,
    generation: Arc<AtomicU64>,
}

impl EspeakEngine {
    /// Probe for an espeak binary and cache its voice list. The engine
    /// degrades to unavailable rather than failing construction.
    pub fn new() -> Self {
        let binary = CANDIDATE_BINARIES
            .iter()
            .find(|bin| {
                std::process::Command::new(bin)
                    .arg("--version")
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .map(|s| s.success())
                    .unwrap_or(false)
            })
            .map(|bin| bin.to_string());

        let voice_list = match binary {
            Some(ref bin) => match Self::probe_voices(bin) {
                Ok(voices) => {
                    info!("espeak engine initialized ({} voices)", voices.len());
                    voices
                }
                Err(e) => {
                    warn!("failed to list espeak voices: {}", e);
                    Vec::new()
                }
            },
            None => {
                warn!("no espeak binary found, engine unavailable");
                Vec::new()
            }
        };

        let (events, _) = broadcast::channel(64);
        Self {
            binary,
            voice_list,
            events,
            child: Arc::new(Mutex::new(None)),
            current: Arc::new(Mutex::new(None)),
            paused: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    fn probe_voices(binary: &str) -> std::io::Result<Vec<String>> {
        let output = std::process::Command::new(binary)
            .arg("--voices")
            .stderr(Stdio::null())
            .output()?;

        let text = String::from_utf8_lossy(&output.stdout);
        // Column layout: Pty Language Age/Gender VoiceName File Other
        let voices = text
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().nth(1))
            .map(|code| code.to_string())
            .collect();
        Ok(voices)
    }

    /// Kill the running child without emitting any event
    fn kill_silently(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(mut child) = self.child.lock().take() {
            let _ = child.start_kill();
            tokio::spawn(async move {
                let _ = child.wait().await;
            });
        }
    }

    fn spawn_child(&self, utterance: Utterance) -> Result<(), VoiceError> {
        let binary = self
            .binary
            .as_ref()
            .ok_or_else(|| VoiceError::Engine("espeak not available".to_string()))?;

        let amplitude = (utterance.volume.clamp(0.0, 1.0) * 200.0) as u32;
        let pitch = (50.0 + utterance.pitch.clamp(-1.0, 1.0) * 49.0) as u32;
        let rate = if utterance.rate == 0 { 150 } else { utterance.rate };

        let mut command = Command::new(binary);
        command
            .arg("-a")
            .arg(amplitude.to_string())
            .arg("-s")
            .arg(rate.to_string())
            .arg("-p")
            .arg(pitch.to_string());

        if let Some(ref voice) = utterance.voice {
            command.arg("-v").arg(voice);
        }

        command
            .arg(&utterance.text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let child = command
            .spawn()
            .map_err(|e| VoiceError::Engine(format!("failed to spawn {}: {}", binary, e)))?;

        let generation = self.generation.clone();
        let gen = generation.fetch_add(1, Ordering::SeqCst) + 1;

        *self.child.lock() = Some(child);

        let slot = self.child.clone();
        let current = self.current.clone();
        let events = self.events.clone();
        let id = utterance.id;

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(REAP_POLL_MS)).await;
                if generation.load(Ordering::SeqCst) != gen {
                    return; // superseded by a newer utterance or a kill
                }

                let outcome = {
                    let mut guard = slot.lock();
                    match guard.as_mut() {
                        Some(child) => match child.try_wait() {
                            Ok(Some(status)) => {
                                guard.take();
                                Some(Ok(status))
                            }
                            Ok(None) => None,
                            Err(e) => {
                                guard.take();
                                Some(Err(e))
                            }
                        },
                        None => return,
                    }
                };

                match outcome {
                    Some(Ok(status)) => {
                        current.lock().take();
                        if status.success() {
                            let _ = events.send(EngineEvent::Ended { utterance: id });
                        } else {
                            let _ = events.send(EngineEvent::Failed {
                                utterance: id,
                                failure: EngineFailure::Fatal(format!(
                                    "espeak exited with {}",
                                    status
                                )),
                            });
                        }
                        return;
                    }
                    Some(Err(e)) => {
                        current.lock().take();
                        let _ = events.send(EngineEvent::Failed {
                            utterance: id,
                            failure: EngineFailure::Fatal(e.to_string()),
                        });
                        return;
                    }
                    None => continue,
                }
            }
        });

        Ok(())
    }
}

impl Default for EspeakEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechEngine for EspeakEngine {
    fn speak(&self, utterance: Utterance) -> Result<(), VoiceError> {
        if self.binary.is_none() {
            return Err(VoiceError::Engine("espeak not available".to_string()));
        }

        self.kill_silently();
        self.paused.lock().take();

        // Zero-length utterances (the audio unlock) have nothing to
        // synthesize; report completion immediately.
        if utterance.text.trim().is_empty() {
            let _ = self.events.send(EngineEvent::Started {
                utterance: utterance.id,
            });
            let _ = self.events.send(EngineEvent::Ended {
                utterance: utterance.id,
            });
            return Ok(());
        }

        let id = utterance.id;
        *self.current.lock() = Some(utterance.clone());
        match self.spawn_child(utterance) {
            Ok(()) => {
                let _ = self.events.send(EngineEvent::Started { utterance: id });
                Ok(())
            }
            Err(e) => {
                self.current.lock().take();
                Err(e)
            }
        }
    }

    fn pause(&self) {
        self.kill_silently();
        if let Some(utterance) = self.current.lock().take() {
            debug!(id = utterance.id, "espeak paused (utterance will replay)");
            *self.paused.lock() = Some(utterance);
        }
    }

    fn resume(&self) {
        let utterance = self.paused.lock().take();
        if let Some(utterance) = utterance {
            *self.current.lock() = Some(utterance.clone());
            if let Err(e) = self.spawn_child(utterance) {
                warn!("failed to resume espeak utterance: {}", e);
            }
        }
    }

    fn cancel(&self) {
        self.paused.lock().take();
        self.kill_silently();
        if let Some(utterance) = self.current.lock().take() {
            let _ = self.events.send(EngineEvent::Failed {
                utterance: utterance.id,
                failure: EngineFailure::Interrupted,
            });
        }
    }

    fn is_speaking(&self) -> bool {
        self.current.lock().is_some()
    }

    fn supports_stall_nudge(&self) -> bool {
        // pause kills the child and resume replays the utterance from
        // its start; a nudge would re-speak the chunk
        false
    }

    fn set_volume(&self, _volume: f32) -> bool {
        // Amplitude is fixed at spawn time; callers use the mute-pause
        // fallback instead.
        false
    }

    fn voices(&self) -> Vec<String> {
        self.voice_list.clone()
    }

    fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    fn name(&self) -> &str {
        "espeak"
    }

    fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }
}
