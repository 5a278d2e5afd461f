use thiserror::Error;

/// Errors raised while configuring, training or inspecting a language model.
///
/// Generation never fails: a seed that cannot be continued, or a frame that
/// has no trained follower, is reported through
/// [`StopReason`](crate::model::language_model::StopReason) instead.
#[derive(Debug, Error)]
pub enum ModelError {
	/// The window length must be at least one character.
	#[error("window length must be >= 1, got {0}")]
	InvalidWindowLength(usize),

	/// A frequency table with no observed follower cannot be normalized.
	#[error("cannot finalize the empty frequency table of window {window:?}")]
	EmptyTable { window: String },

	/// Probabilities of a table are computed once, after counting is complete.
	#[error("frequency table for window {window:?} is already finalized")]
	AlreadyFinalized { window: String },

	/// Training is a single pass; build a new model to train again.
	#[error("model is already trained")]
	AlreadyTrained,

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}
