//! Matching by string length.

use serde::{Deserialize, Serialize};

use crate::error::{LexmatchError, Result};
use crate::matcher::Matcher;

/// Mean and population standard deviation of the character lengths of
/// `corpus`, or `None` for an empty corpus.
pub(crate) fn length_stats<I, S>(corpus: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lengths: Vec<f64> = corpus
        .into_iter()
        .map(|word| word.as_ref().chars().count() as f64)
        .collect();
    if lengths.is_empty() {
        return None;
    }

    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / n;
    let variance = lengths.iter().map(|len| (len - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

/// Matches strings whose length lies within inclusive bounds.
///
/// A new matcher has no bounds; configure at least one with
/// [`with_range`](Self::with_range), [`with_stdev`](Self::with_stdev) or
/// [`from_corpus`](Self::from_corpus) before matching.
///
/// ```
/// use lexmatch::matcher::{LengthMatcher, Matcher};
///
/// let matcher = LengthMatcher::new().with_range(Some(3), Some(5));
/// assert!(matcher.is_match("kiwi").unwrap());
/// assert!(!matcher.is_match("pohutukawa").unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthMatcher {
    min: Option<f64>,
    max: Option<f64>,
    inverted: bool,
}

impl LengthMatcher {
    /// Create an unconfigured matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept lengths in `[min, max]`; a missing bound is unlimited.
    pub fn with_range(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min = min.map(|min| min as f64);
        self.max = max.map(|max| max as f64);
        self
    }

    /// Accept lengths within `k` standard deviations of `mean`.
    pub fn with_stdev(mut self, mean: f64, stdev: f64, k: f64) -> Result<Self> {
        if !mean.is_finite() || !stdev.is_finite() || !k.is_finite() || stdev < 0.0 || k < 0.0 {
            return Err(LexmatchError::invalid_argument(format!(
                "length bounds need a finite mean and non-negative stdev and k, got mean={mean}, stdev={stdev}, k={k}"
            )));
        }
        self.min = Some(mean - k * stdev);
        self.max = Some(mean + k * stdev);
        Ok(self)
    }

    /// Accept lengths within `k` population standard deviations of the mean
    /// length of `corpus`.
    pub fn from_corpus<I, S>(corpus: I, k: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (mean, stdev) = length_stats(corpus).ok_or_else(|| {
            LexmatchError::invalid_argument("cannot derive length bounds from an empty corpus")
        })?;
        Self::new().with_stdev(mean, stdev, k)
    }

    /// The configured `(min, max)` bounds.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.min, self.max)
    }

    pub fn is_configured(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    fn in_range(&self, text: &str) -> Result<bool> {
        if !self.is_configured() {
            return Err(LexmatchError::invalid_argument(
                "LengthMatcher has no bounds; configure a range or standard deviation first",
            ));
        }

        let len = text.chars().count() as f64;
        let above_min = self.min.is_none_or(|min| len >= min);
        let below_max = self.max.is_none_or(|max| len <= max);
        Ok(above_min && below_max)
    }
}

impl Matcher for LengthMatcher {
    fn is_match(&self, text: &str) -> Result<bool> {
        Ok(self.in_range(text)? != self.inverted)
    }

    fn match_probability(&self, text: &str) -> Result<f64> {
        Ok(if self.in_range(text)? { 1.0 } else { 0.0 })
    }

    fn invert(&mut self) {
        self.inverted = !self.inverted;
    }

    fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn name(&self) -> &str {
        "length"
    }
}
