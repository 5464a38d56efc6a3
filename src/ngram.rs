//! N-gram extraction, frequency distributions and Laplace smoothing.
//!
//! [`NgramModel`] turns strings and corpora into [`FrequencyDistribution`]s,
//! which feed the distance metrics and the classifiers.

pub mod distribution;
pub mod model;

use std::collections::BTreeSet;

pub use distribution::FrequencyDistribution;
pub use model::NgramModel;

use crate::error::Result;

/// Raw n-gram counts of `text`.
///
/// ```
/// let counts = lexmatch::ngram::ngram_frequency("john", 1).unwrap();
/// assert_eq!(counts.get("j"), 1.0);
/// assert_eq!(counts.len(), 4);
/// ```
pub fn ngram_frequency(text: &str, degree: usize) -> Result<FrequencyDistribution> {
    NgramModel::new(degree)?.frequency(text)
}

/// Distinct n-grams of `text`.
pub fn ngram_set(text: &str, degree: usize) -> Result<BTreeSet<String>> {
    Ok(NgramModel::new(degree)?.ngram_set(text))
}
