//! Loading of line-aligned parallel text
//!
//! One sentence per line, UTF-8, whitespace-tokenized. Corpora are aligned
//! by position only, so every comparison checks lengths up front instead
//! of pairing lines until the shorter file runs out.

use crate::error::{CompareError, Result};
use std::fs;
use std::path::Path;

/// Opaque token
pub type Token = String;

/// Ordered sequence of tokens
pub type Sentence = Vec<Token>;

/// Ordered sequence of sentences
pub type Corpus = Vec<Sentence>;

/// Split a line on whitespace into a sentence
pub fn tokenize_line(line: &str) -> Sentence {
    line.split_whitespace().map(str::to_string).collect()
}

/// Read every line of a UTF-8 file without trailing newlines
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| CompareError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Load a whitespace-tokenized corpus
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let corpus: Corpus = read_lines(path)?
        .iter()
        .map(|line| tokenize_line(line))
        .collect();
    tracing::debug!("Loaded {} sentences from {}", corpus.len(), path.display());
    Ok(corpus)
}

/// Check that every named sequence has the same length as the first one
///
/// # Example
/// ```
/// use compare_mt::corpus::ensure_aligned;
///
/// assert!(ensure_aligned(&[("ref", 3), ("out", 3)]).is_ok());
/// assert!(ensure_aligned(&[("ref", 3), ("out", 2)]).is_err());
/// ```
pub fn ensure_aligned(parts: &[(&str, usize)]) -> Result<()> {
    let Some(&(left, left_len)) = parts.first() else {
        return Ok(());
    };

    for &(right, right_len) in &parts[1..] {
        if right_len != left_len {
            return Err(CompareError::InputAlignment {
                left: left.to_string(),
                left_len,
                right: right.to_string(),
                right_len,
            });
        }
    }

    Ok(())
}
