//! Configuration for the narration pipeline

use serde::{Deserialize, Serialize};

/// Narration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Maximum spoken length of a single chunk, in characters.
    /// Utterances longer than this risk engine truncation or timeouts.
    pub max_chunk_len: usize,

    /// Speech rate (words per minute, 0-500, default 150)
    pub rate: u32,

    /// Volume (0.0-1.0, default 0.8)
    pub volume: f32,

    /// Pitch adjustment (-1.0 to 1.0, default 0.0)
    pub pitch: f32,

    /// Watchdog interval in seconds; while speaking, the engine is
    /// nudged with a pause/resume cycle this often to work around
    /// engines that stall under continuous synthesis.
    pub watchdog_interval_secs: u64,

    /// Dispatch a zero-volume empty utterance before the first real
    /// chunk. Some platforms only unlock audio output when the first
    /// utterance is tied directly to a user gesture.
    pub unlock_utterance: bool,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            max_chunk_len: 160,
            rate: 150,
            volume: 0.8,
            pitch: 0.0,
            watchdog_interval_secs: 10,
            unlock_utterance: true,
        }
    }
}

impl NarrationConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chunk_len < 20 {
            return Err("Chunk length too small (min 20 chars)".to_string());
        }

        if self.max_chunk_len > 1000 {
            return Err("Chunk length too large (max 1000 chars)".to_string());
        }

        if self.rate > 500 {
            return Err("Speech rate must be between 0 and 500 WPM".to_string());
        }

        if !(0.0..=1.0).contains(&self.volume) {
            return Err("Volume must be between 0.0 and 1.0".to_string());
        }

        if !(-1.0..=1.0).contains(&self.pitch) {
            return Err("Pitch must be between -1.0 and 1.0".to_string());
        }

        if self.watchdog_interval_secs == 0 {
            return Err("Watchdog interval must be greater than 0".to_string());
        }

        if self.watchdog_interval_secs > 300 {
            return Err("Watchdog interval too large (max 300 seconds)".to_string());
        }

        Ok(())
    }
}
