//! compare-mt - statistical comparison of machine translation outputs
//!
//! This library provides the analysis engine behind the `compare-mt` binary:
//! n-gram attribution between a reference and one or two system outputs,
//! word F-measure bucketed by training frequency, and paired bootstrap
//! significance tests over pluggable metrics.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod ngram;

pub use error::{CompareError, Result};
