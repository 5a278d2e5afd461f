//! Character-level sliding window text generation library.
//!
//! This crate provides:
//! - Per-window follower frequency tables with cumulative probabilities
//! - A language model trained in a single pass over a corpus
//! - Seeded or entropy-based weighted random generation
//! - Corpus loading helpers

/// Language model, frequency tables and configuration.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// Corpus loading (file or any reader).
pub mod io;

pub use error::ModelError;
pub use model::config::{ModelConfig, SeedMode, DEFAULT_SEED};
pub use model::language_model::{Generation, LanguageModel, StopReason};
