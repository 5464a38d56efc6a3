//! Frequency distributions over symbols.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Mapping from symbol (character, n-gram or label) to a count or probability.
///
/// Keys are kept in lexicographic order. Absent keys read as zero. After
/// [`normalize`](Self::normalize) the values sum to 1.0 within floating
/// tolerance, unless the distribution is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyDistribution {
    entries: BTreeMap<String, f64>,
    normalized: bool,
}

impl FrequencyDistribution {
    /// Create an empty distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a distribution from `(symbol, count)` pairs, summing repeats.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut distribution = Self::new();
        for (symbol, count) in counts {
            distribution.add(symbol, count);
        }
        distribution
    }

    /// Add `amount` to the value stored for `symbol`.
    pub fn add<S: Into<String>>(&mut self, symbol: S, amount: f64) {
        *self.entries.entry(symbol.into()).or_insert(0.0) += amount;
        self.normalized = false;
    }

    /// Add one observation of `symbol`.
    pub fn increment<S: Into<String>>(&mut self, symbol: S) {
        self.add(symbol, 1.0);
    }

    /// Value for `symbol`, or 0.0 if it was never observed.
    pub fn get(&self, symbol: &str) -> f64 {
        self.entries.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Whether the values are probabilities.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Scale all values so they sum to 1.0.
    ///
    /// A distribution whose values sum to zero is left unchanged.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for value in self.entries.values_mut() {
                *value /= total;
            }
            self.normalized = true;
        }
    }

    /// Consume and return the normalized distribution.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Iterate over `(symbol, value)` in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(symbol, value)| (symbol.as_str(), *value))
    }

    /// Iterate over symbols in order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The set of symbols with a non-zero value.
    pub fn support(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|(_, value)| **value > 0.0)
            .map(|(symbol, _)| symbol.clone())
            .collect()
    }

    /// The `k` symbols with the highest values, ties broken by symbol order.
    pub fn most_common(&self, k: usize) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .entries
            .iter()
            .map(|(symbol, value)| (symbol.clone(), *value))
            .collect();

        // Stable sort keeps symbol order among equal values.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        ranked
    }
}

impl<S: Into<String>> FromIterator<S> for FrequencyDistribution {
    /// Count each item once.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut distribution = Self::new();
        for symbol in iter {
            distribution.increment(symbol);
        }
        distribution
    }
}
