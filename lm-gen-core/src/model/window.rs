use std::collections::VecDeque;

/// Sliding frame of at most `capacity` characters.
///
/// Used both to scan the corpus during training and to track the trailing
/// window of the text during generation.
#[derive(Clone, Debug)]
pub(crate) struct Frame {
	capacity: usize,
	chars: VecDeque<char>,
}

impl Frame {
	pub(crate) fn new(capacity: usize) -> Self {
		Self { capacity, chars: VecDeque::with_capacity(capacity) }
	}

	/// Builds a frame holding the last `capacity` characters of `text`.
	///
	/// Returns `None` if `text` is shorter than `capacity`.
	pub(crate) fn trailing(text: &str, capacity: usize) -> Option<Self> {
		let len = text.chars().count();
		if len < capacity {
			return None;
		}

		let mut frame = Self::new(capacity);
		frame.chars.extend(text.chars().skip(len - capacity));
		Some(frame)
	}

	/// Appends `c` unless the frame is already full.
	pub(crate) fn fill(&mut self, c: char) {
		if !self.is_full() {
			self.chars.push_back(c);
		}
	}

	/// Drops the oldest character and appends `c`.
	pub(crate) fn slide(&mut self, c: char) {
		if self.is_full() {
			self.chars.pop_front();
		}
		self.chars.push_back(c);
	}

	pub(crate) fn is_full(&self) -> bool {
		self.chars.len() >= self.capacity
	}

	/// Window key of the current content.
	pub(crate) fn key(&self) -> String {
		self.chars.iter().collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fill_stops_at_capacity() {
		let mut frame = Frame::new(2);
		frame.fill('a');
		assert!(!frame.is_full());
		frame.fill('b');
		frame.fill('c');
		assert!(frame.is_full());
		assert_eq!(frame.key(), "ab");
	}

	#[test]
	fn slide_drops_oldest() {
		let mut frame = Frame::new(3);
		for c in "abcde".chars() {
			frame.slide(c);
		}
		assert_eq!(frame.key(), "cde");
	}

	#[test]
	fn trailing_takes_last_characters() {
		assert_eq!(Frame::trailing("hello", 3).map(|f| f.key()), Some("llo".to_owned()));
		assert_eq!(Frame::trailing("hé!", 2).map(|f| f.key()), Some("é!".to_owned()));
		assert_eq!(Frame::trailing("abc", 3).map(|f| f.key()), Some("abc".to_owned()));
		assert!(Frame::trailing("ab", 3).is_none());
	}
}
