//! Top-level module for the sliding window language model.
//!
//! This module provides:
//! - Per-window follower distributions (`FrequencyTable`)
//! - The trainable, seedable model (`LanguageModel`)
//! - Construction parameters (`ModelConfig`, `SeedMode`)

/// Character-level language model over fixed-length windows.
///
/// Handles corpus ingestion, table finalization, seeded generation
/// and diagnostic dumps.
pub mod language_model;

/// Follower distribution of a single window.
///
/// Counts followers, normalizes them into cumulative probabilities
/// and samples from a uniform draw.
pub mod frequency_table;

/// Model construction parameters.
pub mod config;

/// Sliding character frame shared by training and generation.
///
/// This module is not exposed publicly.
mod window;
