use crate::corpus::{read_lines, Sentence};
use crate::error::{CompareError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Training-corpus token frequencies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count tokens of a training corpus
    pub fn from_corpus(corpus: &[Sentence]) -> Self {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for token in corpus.iter().flatten() {
            *counts.entry(token.clone()).or_default() += 1;
        }
        Self { counts }
    }

    /// Parse `token<TAB>count` lines
    ///
    /// Blank lines are skipped and a repeated token keeps its last count.
    ///
    /// # Example
    /// ```
    /// use compare_mt::frequency::FrequencyTable;
    ///
    /// let table = FrequencyTable::from_counts_str("the\t120\ncat\t3\n").unwrap();
    /// assert_eq!(table.frequency("the"), 120);
    /// assert_eq!(table.frequency("dog"), 0);
    /// ```
    pub fn from_counts_str(text: &str) -> Result<Self> {
        let mut counts = HashMap::new();

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let malformed = || CompareError::MalformedFrequencyFile {
                line: idx + 1,
                content: line.to_string(),
            };

            let (token, count) = line.split_once('\t').ok_or_else(malformed)?;
            let token = token.trim();
            if token.is_empty() || token.contains(char::is_whitespace) {
                return Err(malformed());
            }
            let count = count.trim().parse::<u64>().map_err(|_| malformed())?;

            counts.insert(token.to_string(), count);
        }

        Ok(Self { counts })
    }

    /// Load a `token<TAB>count` file
    pub fn from_counts_file(path: &Path) -> Result<Self> {
        let table = Self::from_counts_str(&read_lines(path)?.join("\n"))?;
        tracing::debug!(
            "Loaded {} token frequencies from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Training frequency of a token (0 when unseen)
    pub fn frequency(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
