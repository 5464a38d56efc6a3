//! Character n-gram extraction and counting.

use std::collections::BTreeSet;

use crate::alphabet::Alphabet;
use crate::error::{LexmatchError, Result};
use crate::ngram::distribution::FrequencyDistribution;

/// Counts contiguous character windows of a fixed length.
///
/// # Examples
///
/// ```
/// use lexmatch::alphabet::Alphabet;
/// use lexmatch::ngram::NgramModel;
///
/// let model = NgramModel::new(2).unwrap();
/// assert_eq!(model.ngrams("hello"), vec!["he", "el", "ll", "lo"]);
///
/// // Laplace smoothing over every bigram of "ab".
/// let smoothed = NgramModel::new(2)
///     .unwrap()
///     .normalize(true)
///     .smoothing(Alphabet::from_chars("ab").ngrams(2).unwrap())
///     .unwrap();
/// let distribution = smoothed.frequency("aab").unwrap();
/// // counts: aa 1+1, ab 1+1, ba 0+1, bb 0+1
/// assert!((distribution.get("aa") - 2.0 / 6.0).abs() < 1e-12);
/// assert!((distribution.get("bb") - 1.0 / 6.0).abs() < 1e-12);
///
/// // "c" has no place in the smoothing alphabet.
/// assert!(smoothed.frequency("abc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NgramModel {
    degree: usize,
    normalize: bool,
    smoothing: Option<Alphabet>,
}

impl NgramModel {
    /// Create a model for n-grams of length `degree` (must be >= 1).
    pub fn new(degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(LexmatchError::invalid_argument(
                "n-gram degree must be at least 1",
            ));
        }
        Ok(NgramModel {
            degree,
            normalize: false,
            smoothing: None,
        })
    }

    /// Return probabilities instead of counts.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Apply add-one smoothing over `alphabet`, which must list every possible
    /// n-gram of this model's degree. Counting text with an n-gram outside
    /// `alphabet` then fails instead of leaking mass past it.
    pub fn smoothing(mut self, alphabet: Alphabet) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(LexmatchError::invalid_argument(
                "smoothing alphabet must not be empty",
            ));
        }
        if alphabet.symbol_len() != Some(self.degree) {
            return Err(LexmatchError::invalid_argument(format!(
                "smoothing alphabet must contain n-grams of length {}",
                self.degree
            )));
        }
        self.smoothing = Some(alphabet);
        Ok(self)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn smoothing_alphabet(&self) -> Option<&Alphabet> {
        self.smoothing.as_ref()
    }

    /// All n-grams of `text` in order of occurrence, repeats included.
    ///
    /// Empty when `text` is shorter than the degree.
    pub fn ngrams(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .windows(self.degree)
            .map(|window| window.iter().collect())
            .collect()
    }

    /// The distinct n-grams of `text`.
    pub fn ngram_set(&self, text: &str) -> BTreeSet<String> {
        self.ngrams(text).into_iter().collect()
    }

    /// N-gram distribution of a single string.
    ///
    /// With smoothing configured, an n-gram missing from the smoothing
    /// alphabet is an [`LexmatchError::InvalidArgument`].
    pub fn frequency(&self, text: &str) -> Result<FrequencyDistribution> {
        let counts: FrequencyDistribution = self.ngrams(text).into_iter().collect();
        self.finish(counts)
    }

    /// N-gram distribution aggregated over every member of `corpus`.
    pub fn corpus_frequency<I, S>(&self, corpus: I) -> Result<FrequencyDistribution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = FrequencyDistribution::new();
        for text in corpus {
            for gram in self.ngrams(text.as_ref()) {
                counts.increment(gram);
            }
        }
        self.finish(counts)
    }

    fn finish(&self, mut counts: FrequencyDistribution) -> Result<FrequencyDistribution> {
        if let Some(alphabet) = &self.smoothing {
            if let Some(symbol) = counts.symbols().find(|symbol| !alphabet.contains(symbol)) {
                return Err(LexmatchError::invalid_argument(format!(
                    "n-gram '{symbol}' is not in the smoothing alphabet"
                )));
            }
            for symbol in alphabet.iter() {
                counts.increment(symbol);
            }
        }
        if self.normalize {
            counts.normalize();
        }
        Ok(counts)
    }
}
