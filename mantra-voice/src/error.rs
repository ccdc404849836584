//! Error types for mantra-voice

use mantra_core::Error as CoreError;
use mantra_translate::TranslateError;
use thiserror::Error;

/// Narration and speech engine errors
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Narration error: {0}")]
    Narration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Translation error: {0}")]
    Translation(#[from] TranslateError),
}

impl From<VoiceError> for CoreError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::Translation(e) => e.into(),
            VoiceError::Engine(msg) => CoreError::Engine(msg),
            VoiceError::Config(msg) => CoreError::Configuration(msg),
            VoiceError::Narration(msg) => CoreError::Narration(msg),
        }
    }
}
