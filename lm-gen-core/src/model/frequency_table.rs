use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::ModelError;

/// One observed follower of a window.
///
/// `p` and `cp` stay unset until the owning table is finalized.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CharEntry {
	character: char,
	count: usize,
	p: Option<f64>,
	cp: Option<f64>,
}

impl CharEntry {
	fn new(character: char) -> Self {
		Self { character, count: 1, p: None, cp: None }
	}

	pub fn character(&self) -> char {
		self.character
	}

	/// Number of times this follower was observed (always >= 1).
	pub fn count(&self) -> usize {
		self.count
	}

	/// Probability of this follower, once the table is finalized.
	pub fn p(&self) -> Option<f64> {
		self.p
	}

	/// Cumulative probability up to and including this entry.
	pub fn cp(&self) -> Option<f64> {
		self.cp
	}
}

impl fmt::Display for CharEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (self.p, self.cp) {
			(Some(p), Some(cp)) => write!(f, "({:?} {} {} {})", self.character, self.count, p, cp),
			_ => write!(f, "({:?} {})", self.character, self.count),
		}
	}
}

/// Follower distribution of a single window.
///
/// A `FrequencyTable` corresponds to a fixed window (`key`) and stores every
/// character observed right after it, with its occurrence count.
/// Once counting is done, `finalize` turns the counts into probabilities and
/// cumulative probabilities so that one uniform draw selects a follower.
///
/// ## Responsibilities:
/// - Accumulate follower occurrences during training
/// - Normalize counts into `p` / `cp`
/// - Sample the next character from a uniform draw in `[0, 1)`
///
/// ## Invariants
/// - At most one entry per character
/// - Every entry count is strictly positive
/// - Entries keep their first-observation order, which is the `cp` order
/// - Once finalized, `cp` is non-decreasing and the last `cp` is 1.0
#[derive(Serialize, Clone, Debug)]
pub struct FrequencyTable {
	/// Window this table belongs to.
	#[serde(skip)]
	key: String,
	/// Followers in first-observation order.
	entries: Vec<CharEntry>,
	/// Position of each character in `entries`.
	#[serde(skip)]
	index: HashMap<char, usize>,
	#[serde(skip)]
	finalized: bool,
}

impl FrequencyTable {
	/// Creates a new empty table for the given window.
	pub fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			entries: Vec::new(),
			index: HashMap::new(),
			finalized: false,
		}
	}

	/// Records an occurrence of `character` after this window.
	///
	/// - If the character was already seen, its count is increased.
	/// - Otherwise, a new entry is appended with a count of 1.
	///
	/// Recording into a finalized table discards its probabilities:
	/// the table must be finalized again before it can be sampled.
	pub fn record(&mut self, character: char) {
		if self.finalized {
			log::warn!("recording {:?} into finalized table {:?}", character, self.key);
			self.invalidate();
		}

		match self.index.get(&character) {
			Some(&position) => self.entries[position].count += 1,
			None => {
				self.index.insert(character, self.entries.len());
				self.entries.push(CharEntry::new(character));
			}
		}
	}

	/// Computes `p` and `cp` for every entry.
	///
	/// `p = count / total` and `cp` is the running sum of `p` in
	/// iteration order.
	///
	/// # Errors
	/// - `EmptyTable` if nothing was recorded.
	/// - `AlreadyFinalized` if no count changed since the last call.
	pub fn finalize(&mut self) -> Result<(), ModelError> {
		if self.finalized {
			return Err(ModelError::AlreadyFinalized { window: self.key.clone() });
		}

		let total = self.total();
		if total == 0 {
			return Err(ModelError::EmptyTable { window: self.key.clone() });
		}

		let total = total as f64;
		let mut cp = 0.0;
		for entry in &mut self.entries {
			let p = entry.count as f64 / total;
			cp += p;
			entry.p = Some(p);
			entry.cp = Some(cp);
		}

		self.finalized = true;
		Ok(())
	}

	/// Picks a follower from a uniform draw `random_unit` in `[0, 1)`.
	///
	/// Returns the first entry whose `cp` is strictly greater than the draw.
	/// When accumulated rounding leaves the last `cp` just under the draw,
	/// the last entry is returned.
	///
	/// Returns `None` if the table is empty or not finalized.
	pub fn sample(&self, random_unit: f64) -> Option<char> {
		if !self.finalized {
			return None;
		}

		self.entries
			.iter()
			.find(|entry| entry.cp.is_some_and(|cp| cp > random_unit))
			.or_else(|| self.entries.last())
			.map(|entry| entry.character)
	}

	/// Returns the entry recorded for `character`, if any.
	pub fn get(&self, character: char) -> Option<&CharEntry> {
		self.index.get(&character).map(|&position| &self.entries[position])
	}

	/// Iterates entries in the fixed sampling order.
	pub fn iter(&self) -> impl Iterator<Item = &CharEntry> {
		self.entries.iter()
	}

	/// Sum of all counts.
	pub fn total(&self) -> usize {
		self.entries.iter().map(CharEntry::count).sum()
	}

	/// Number of distinct followers.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn is_finalized(&self) -> bool {
		self.finalized
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	fn invalidate(&mut self) {
		for entry in &mut self.entries {
			entry.p = None;
			entry.cp = None;
		}
		self.finalized = false;
	}
}

impl fmt::Display for FrequencyTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(")?;
		for (i, entry) in self.entries.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{entry}")?;
		}
		write!(f, ")")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn table_of(key: &str, followers: &str) -> FrequencyTable {
		let mut table = FrequencyTable::new(key);
		for c in followers.chars() {
			table.record(c);
		}
		table
	}

	#[test]
	fn record_inserts_then_increments() {
		let table = table_of("ab", "xyx");

		assert_eq!(table.len(), 2);
		assert_eq!(table.total(), 3);
		assert_eq!(table.get('x').map(CharEntry::count), Some(2));
		assert_eq!(table.get('y').map(CharEntry::count), Some(1));
		assert!(table.get('z').is_none());
	}

	#[test]
	fn entries_keep_first_observation_order() {
		let table = table_of("k", "cabca");
		let order: Vec<char> = table.iter().map(CharEntry::character).collect();
		assert_eq!(order, vec!['c', 'a', 'b']);
	}

	#[test]
	fn finalize_normalizes_counts() {
		let mut table = table_of("a", "aab");
		table.finalize().unwrap();

		let a = table.get('a').unwrap();
		let b = table.get('b').unwrap();
		assert!((a.p().unwrap() - 2.0 / 3.0).abs() < 1e-12);
		assert!((b.p().unwrap() - 1.0 / 3.0).abs() < 1e-12);
		assert!((a.cp().unwrap() - 2.0 / 3.0).abs() < 1e-12);
		assert!((b.cp().unwrap() - 1.0).abs() < 1e-12);
	}

	#[test]
	fn cumulative_probabilities_end_at_one() {
		let mut table = table_of("w", "the quick brown fox jumps over the lazy dog");
		table.finalize().unwrap();

		let sum: f64 = table.iter().filter_map(CharEntry::p).sum();
		assert!((sum - 1.0).abs() < 1e-9);

		let cps: Vec<f64> = table.iter().filter_map(CharEntry::cp).collect();
		assert_eq!(cps.len(), table.len());
		assert!(cps.windows(2).all(|pair| pair[0] <= pair[1]));
		assert!((cps[cps.len() - 1] - 1.0).abs() < 1e-9);
	}

	#[test]
	fn finalize_rejects_empty_and_repeated_calls() {
		let mut empty = FrequencyTable::new("e");
		assert!(matches!(empty.finalize(), Err(ModelError::EmptyTable { .. })));

		let mut table = table_of("e", "x");
		table.finalize().unwrap();
		assert!(matches!(table.finalize(), Err(ModelError::AlreadyFinalized { window }) if window == "e"));
	}

	#[test]
	fn sample_uses_strict_cumulative_threshold() {
		let mut table = table_of("a", "ab");
		table.finalize().unwrap();

		assert_eq!(table.sample(0.0), Some('a'));
		assert_eq!(table.sample(0.3), Some('a'));
		// cp of 'a' is exactly 0.5, so 0.5 falls through to 'b'
		assert_eq!(table.sample(0.5), Some('b'));
		assert_eq!(table.sample(0.999), Some('b'));
	}

	#[test]
	fn sample_falls_back_to_last_entry() {
		let mut table = table_of("a", "xyz");
		table.finalize().unwrap();
		assert_eq!(table.sample(1.0), Some('z'));
	}

	#[test]
	fn sample_requires_finalize() {
		let table = table_of("a", "xy");
		assert_eq!(table.sample(0.1), None);
		assert_eq!(FrequencyTable::new("a").sample(0.1), None);
	}

	#[test]
	fn record_after_finalize_invalidates_probabilities() {
		let mut table = table_of("a", "x");
		table.finalize().unwrap();
		table.record('y');

		assert!(!table.is_finalized());
		assert!(table.iter().all(|entry| entry.p().is_none() && entry.cp().is_none()));
		assert_eq!(table.sample(0.1), None);

		table.finalize().unwrap();
		assert_eq!(table.sample(0.9), Some('y'));
	}

	#[test]
	fn display_lists_entries() {
		let mut table = table_of("a", "ab");
		assert_eq!(table.to_string(), "(('a' 1) ('b' 1))");
		table.finalize().unwrap();
		assert_eq!(table.to_string(), "(('a' 1 0.5 0.5) ('b' 1 0.5 1))");
		assert_eq!(FrequencyTable::new("a").to_string(), "()");
	}
}
