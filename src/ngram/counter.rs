use crate::corpus::{Sentence, Token};
use indexmap::IndexMap;

/// Contiguous run of 1..=N tokens
pub type NgramKey = Vec<Token>;

/// N-gram multiset in first-seen order
pub type NgramCount = IndexMap<NgramKey, usize>;

/// Count every n-gram of length 1..=`max_order` in a sentence
///
/// Overlapping occurrences are all counted. Keys are inserted order by order
/// (all unigrams, then all bigrams, ...), left to right within an order.
///
/// # Example
/// ```
/// use compare_mt::ngram::count_ngrams;
///
/// let sentence: Vec<String> = vec!["a".into(), "a".into(), "a".into()];
/// let counts = count_ngrams(&sentence, 2);
///
/// assert_eq!(counts.get(&vec!["a".to_string()]), Some(&3));
/// assert_eq!(counts.get(&vec!["a".to_string(), "a".to_string()]), Some(&2));
/// ```
pub fn count_ngrams(sentence: &[Token], max_order: usize) -> NgramCount {
    let mut counts = NgramCount::new();

    for n in 1..=max_order {
        // windows() yields nothing when the sentence is shorter than n
        for window in sentence.windows(n) {
            *counts.entry(window.to_vec()).or_insert(0) += 1;
        }
    }

    counts
}

/// Add every count of `from` into `into`
pub fn merge_counts(into: &mut NgramCount, from: &NgramCount) {
    for (ngram, count) in from {
        *into.entry(ngram.clone()).or_insert(0) += count;
    }
}

/// Sum of per-sentence counts over a whole corpus
pub fn count_corpus_ngrams(corpus: &[Sentence], max_order: usize) -> NgramCount {
    let mut total = NgramCount::new();
    for sentence in corpus {
        merge_counts(&mut total, &count_ngrams(sentence, max_order));
    }
    total
}

/// Render an n-gram as space-joined text
pub fn ngram_to_string(ngram: &[Token]) -> String {
    ngram.join(" ")
}
