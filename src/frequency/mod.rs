// Word F-measure Bucketed by Training Frequency
//
// Splits word-level recall/precision by how often each word was seen in
// training data, so that rare-word handling can be compared separately from
// the bulk of frequent words.
//
// The frequency source is, in order of preference: an explicit
// token<TAB>count file, a training corpus, or the reference itself.

mod buckets;
mod table;

pub use buckets::{
    analyze_buckets, bucket_index, bucket_labels, BucketAnalysis, BucketRow, BucketStat,
};
pub use table::FrequencyTable;
