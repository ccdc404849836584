//! mantra-core: shared types for the Mantra narration toolkit
//!
//! Provides the pieces every other crate builds on:
//! - Supported narration languages
//! - Narration requests, translation results, and playback state
//! - Narration configuration with validation
//! - The text pipeline (markup normalization + sentence chunking)

pub mod config;
pub mod error;
pub mod language;
pub mod text;
pub mod types;

pub use config::NarrationConfig;
pub use error::{Error, Result};
pub use language::Language;
pub use types::{NarrationRequest, NarrationStatus, PlaybackState, TranslationResult};
