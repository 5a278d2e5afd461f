use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ModelError;

/// Reads a UTF-8 text file and returns all its characters.
///
/// - Reads the entire file into memory
/// - Keeps line breaks, they are characters of the corpus too
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> Result<Vec<char>, ModelError> {
	let path = filename.as_ref();
	let corpus = read_corpus_from(File::open(path)?)?;
	log::debug!("read {} characters from {}", corpus.len(), path.display());
	Ok(corpus)
}

/// Reads a UTF-8 corpus from any reader.
pub fn read_corpus_from<R: Read>(mut reader: R) -> Result<Vec<char>, ModelError> {
	let mut contents = String::new();
	reader.read_to_string(&mut contents)?;
	Ok(contents.chars().collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::tempdir;

	#[test]
	fn reads_file_with_line_breaks() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("corpus.txt");
		let mut file = File::create(&path).unwrap();
		write!(file, "ab\ncé").unwrap();

		assert_eq!(read_corpus(&path).unwrap(), vec!['a', 'b', '\n', 'c', 'é']);
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let dir = tempdir().unwrap();
		let result = read_corpus(dir.path().join("missing.txt"));
		assert!(matches!(result, Err(ModelError::Io(_))));
	}

	#[test]
	fn invalid_utf8_is_rejected() {
		let result = read_corpus_from(&b"a\xffb"[..]);
		assert!(matches!(result, Err(ModelError::Io(_))));
	}
}
