use std::collections::{BTreeMap, HashMap};
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::config::{ModelConfig, SeedMode};
use super::frequency_table::FrequencyTable;
use super::window::Frame;
use crate::error::ModelError;

/// Character-level sliding window language model.
///
/// The `LanguageModel` maps every window of `window_length` characters seen
/// in the corpus to the distribution of the character that follows it, and
/// extends a text by repeatedly sampling from the distribution of its
/// trailing window.
///
/// # Responsibilities
/// - Build the window mapping in one pass over a corpus
/// - Finalize every frequency table once counting is done
/// - Generate text with its own seedable random source
///
/// # Invariants
/// - `window_length` is always >= 1
/// - Each key of `tables` has exactly `window_length` characters
/// - Once `trained` is set, every table is finalized and never mutated
#[derive(Debug)]
pub struct LanguageModel {
	/// Number of characters in a window
	window_length: usize,

	/// Mapping from a window to the distribution of its followers
	tables: HashMap<String, FrequencyTable>,

	/// Instance-owned random source used for sampling
	rng: StdRng,

	trained: bool,
}

/// Why a generation stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
	/// All requested characters were produced.
	Completed,
	/// The seed text is shorter than the window length.
	SeedTooShort,
	/// The trailing window of the seed text was never seen in training.
	UnknownSeedWindow { window: String },
	/// Generation reached a window with no trained follower.
	UnsampleableFrame { window: String },
}

/// Result of a generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
	/// Seed text followed by the generated characters.
	pub text: String,
	/// Number of characters asked for.
	pub requested: usize,
	/// Number of characters actually appended.
	pub produced: usize,
	pub stop: StopReason,
}

impl Generation {
	/// Returns `true` if every requested character was produced.
	pub fn is_complete(&self) -> bool {
		self.stop == StopReason::Completed
	}
}

/// Serializable view of a trained mapping, windows sorted.
#[derive(Serialize, Debug)]
pub struct ModelSnapshot<'a> {
	pub window_length: usize,
	pub windows: BTreeMap<&'a str, &'a FrequencyTable>,
}

impl LanguageModel {
	/// Creates an untrained model from a validated configuration.
	pub fn new(config: ModelConfig) -> Self {
		let rng = match config.seed_mode() {
			SeedMode::Fixed(seed) => StdRng::seed_from_u64(seed),
			SeedMode::Entropy => StdRng::from_os_rng(),
		};
		Self {
			window_length: config.window_length(),
			tables: HashMap::new(),
			rng,
			trained: false,
		}
	}

	/// Creates a reproducible model: the same seed always generates the same text.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn seeded(window_length: usize, seed: u64) -> Result<Self, ModelError> {
		let config = ModelConfig::new(window_length)?.with_seed_mode(SeedMode::Fixed(seed));
		Ok(Self::new(config))
	}

	/// Creates a model seeded from operating system entropy.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn unseeded(window_length: usize) -> Result<Self, ModelError> {
		let config = ModelConfig::new(window_length)?.with_seed_mode(SeedMode::Entropy);
		Ok(Self::new(config))
	}

	/// Builds the model from a corpus.
	///
	/// The first `window_length` characters fill the initial window. Every
	/// following character is recorded as a follower of the current window,
	/// which then slides by one. All tables are finalized at the end.
	///
	/// A corpus of `window_length` characters or fewer leaves the mapping empty.
	///
	/// # Errors
	/// Returns `AlreadyTrained` if the model was trained before.
	pub fn train<I>(&mut self, corpus: I) -> Result<(), ModelError>
	where
		I: IntoIterator<Item = char>,
	{
		if self.trained {
			return Err(ModelError::AlreadyTrained);
		}

		let mut chars = corpus.into_iter();
		let mut frame = Frame::new(self.window_length);
		while !frame.is_full() {
			let Some(c) = chars.next() else { break };
			frame.fill(c);
		}

		let mut observed = 0usize;
		for c in chars {
			self.tables
				.entry(frame.key())
				.or_insert_with_key(|key| FrequencyTable::new(key))
				.record(c);
			frame.slide(c);
			observed += 1;
		}

		for table in self.tables.values_mut() {
			table.finalize()?;
		}
		self.trained = true;

		log::debug!(
			"trained window length {} on {} transitions, {} windows",
			self.window_length,
			observed,
			self.tables.len()
		);
		Ok(())
	}

	/// Extends `seed_text` by `length` sampled characters.
	///
	/// Returns `seed_text` unchanged if it is shorter than the window length
	/// or if its trailing window was never seen. Generation stops early if it
	/// reaches a window with no trained follower.
	pub fn generate(&mut self, seed_text: &str, length: usize) -> String {
		self.generate_with_report(seed_text, length).text
	}

	/// Same as `generate`, also telling how many characters were produced and why it stopped.
	pub fn generate_with_report(&mut self, seed_text: &str, length: usize) -> Generation {
		let stopped = |produced, stop| Generation {
			text: seed_text.to_owned(),
			requested: length,
			produced,
			stop,
		};

		let Some(mut frame) = Frame::trailing(seed_text, self.window_length) else {
			return stopped(0, StopReason::SeedTooShort);
		};
		let window = frame.key();
		if !self.tables.contains_key(&window) {
			return stopped(0, StopReason::UnknownSeedWindow { window });
		}

		let mut text = seed_text.to_owned();
		for produced in 0..length {
			let window = frame.key();
			let Some(table) = self.tables.get(&window) else {
				log::warn!("generation halted after {produced}/{length} characters: no follower for {window:?}");
				return Generation {
					text,
					requested: length,
					produced,
					stop: StopReason::UnsampleableFrame { window },
				};
			};

			let draw: f64 = self.rng.random();
			let Some(next) = table.sample(draw) else {
				log::warn!("generation halted after {produced}/{length} characters: table {window:?} cannot be sampled");
				return Generation {
					text,
					requested: length,
					produced,
					stop: StopReason::UnsampleableFrame { window },
				};
			};

			text.push(next);
			frame.slide(next);
		}

		log::debug!("generated {length} characters from {seed_text:?}");
		Generation { text, requested: length, produced: length, stop: StopReason::Completed }
	}

	/// Returns a trained window picked with the model's random source.
	///
	/// Useful to start a generation without a user seed.
	/// Returns `None` if the model has no windows.
	pub fn random_window(&mut self) -> Option<String> {
		if self.tables.is_empty() {
			return None;
		}
		// Sorted so that a fixed seed picks the same window on every run
		let mut windows: Vec<&String> = self.tables.keys().collect();
		windows.sort();
		let position = self.rng.random_range(0..windows.len());
		Some(windows[position].clone())
	}

	pub fn window_length(&self) -> usize {
		self.window_length
	}

	pub fn is_trained(&self) -> bool {
		self.trained
	}

	/// Number of distinct windows.
	pub fn len(&self) -> usize {
		self.tables.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	/// Frequency table of `window`, if it was seen in training.
	pub fn table(&self, window: &str) -> Option<&FrequencyTable> {
		self.tables.get(window)
	}

	/// Iterates the trained windows, in no particular order.
	pub fn windows(&self) -> impl Iterator<Item = &str> {
		self.tables.keys().map(String::as_str)
	}

	/// Sorted, serializable view of the mapping.
	pub fn snapshot(&self) -> ModelSnapshot<'_> {
		ModelSnapshot {
			window_length: self.window_length,
			windows: self.tables.iter().map(|(key, table)| (key.as_str(), table)).collect(),
		}
	}

	/// Pretty JSON dump of the mapping.
	pub fn to_json(&self) -> Result<String, ModelError> {
		Ok(serde_json::to_string_pretty(&self.snapshot())?)
	}
}

impl fmt::Display for LanguageModel {
	/// One `window : (entries)` line per window, windows sorted.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (window, table) in self.snapshot().windows {
			writeln!(f, "{window:?} : {table}")?;
		}
		Ok(())
	}
}
