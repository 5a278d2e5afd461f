use crate::error::ModelError;

/// Seed used by the command line when a reproducible run is requested.
pub const DEFAULT_SEED: u64 = 20;

/// How the model's random source is initialised.
///
/// # Variants
/// - `Fixed(u64)`: reproducible, the same seed always yields the same text.
/// - `Entropy`: seeded from the operating system, runs differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedMode {
	Fixed(u64),
	Entropy,
}

impl Default for SeedMode {
	fn default() -> Self {
		SeedMode::Fixed(DEFAULT_SEED)
	}
}

/// Construction parameters of a `LanguageModel`.
///
/// # Invariants
/// - `window_length` is always >= 1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelConfig {
	window_length: usize,
	seed_mode: SeedMode,
}

impl ModelConfig {
	/// Creates a configuration with the default (fixed) seed.
	///
	/// # Errors
	/// Returns `InvalidWindowLength` if `window_length` is 0.
	pub fn new(window_length: usize) -> Result<Self, ModelError> {
		if window_length == 0 {
			return Err(ModelError::InvalidWindowLength(window_length));
		}
		Ok(Self { window_length, seed_mode: SeedMode::default() })
	}

	/// Replaces the seed mode.
	pub fn with_seed_mode(mut self, seed_mode: SeedMode) -> Self {
		self.seed_mode = seed_mode;
		self
	}

	pub fn window_length(&self) -> usize {
		self.window_length
	}

	pub fn seed_mode(&self) -> SeedMode {
		self.seed_mode
	}
}
