//! Alphabets: the explicit symbol support used for smoothing and divergence.
//!
//! An [`Alphabet`] is an ordered, duplicate-free set of symbols. Symbols are
//! usually single characters, or n-grams when an alphabet is expanded with
//! [`Alphabet::ngrams`].

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{LexmatchError, Result};

/// An ordered, duplicate-free set of symbols.
///
/// # Examples
///
/// ```
/// use lexmatch::alphabet::Alphabet;
///
/// let alphabet = Alphabet::from_chars("abca");
/// assert_eq!(alphabet.len(), 3);
///
/// let bigrams = alphabet.ngrams(2).unwrap();
/// assert_eq!(bigrams.len(), 9);
/// assert_eq!(bigrams.symbols()[0], "aa");
/// assert_eq!(bigrams.symbols()[1], "ab");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Alphabet {
    symbols: Vec<String>,
    index: AHashMap<String, usize>,
}

impl Alphabet {
    /// Create an alphabet from symbols, keeping the first occurrence of each.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut alphabet = Alphabet::default();
        for symbol in symbols {
            alphabet.push(symbol.into());
        }
        alphabet
    }

    /// Create a character alphabet from the characters of `chars`.
    pub fn from_chars(chars: &str) -> Self {
        Self::new(chars.chars().map(String::from))
    }

    /// Lowercase ASCII letters `a`..=`z`.
    pub fn alpha() -> Self {
        Self::new(('a'..='z').map(String::from))
    }

    /// ASCII digits `0`..=`9`.
    pub fn numeric() -> Self {
        Self::new(('0'..='9').map(String::from))
    }

    /// Lowercase ASCII letters followed by ASCII digits.
    pub fn alphanumeric() -> Self {
        Self::new(('a'..='z').chain('0'..='9').map(String::from))
    }

    /// Look up a named preset: `"alpha"`, `"numeric"` or `"alphanumeric"`.
    pub fn preset(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "alpha" => Ok(Self::alpha()),
            "numeric" => Ok(Self::numeric()),
            "alphanumeric" => Ok(Self::alphanumeric()),
            _ => Err(LexmatchError::invalid_argument(format!(
                "Unknown alphabet preset: {name}"
            ))),
        }
    }

    fn push(&mut self, symbol: String) {
        if !self.index.contains_key(&symbol) {
            self.index.insert(symbol.clone(), self.symbols.len());
            self.symbols.push(symbol);
        }
    }

    /// Expand this alphabet to every sequence of `degree` symbols.
    ///
    /// The result is ordered lexicographically by symbol position, so the
    /// expansion of `"ab"` to degree 2 is `aa, ab, ba, bb`.
    pub fn ngrams(&self, degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(LexmatchError::invalid_argument(
                "n-gram degree must be at least 1",
            ));
        }

        let mut current: Vec<String> = vec![String::new()];
        for _ in 0..degree {
            let mut next = Vec::with_capacity(current.len() * self.symbols.len());
            for prefix in &current {
                for symbol in &self.symbols {
                    let mut gram = String::with_capacity(prefix.len() + symbol.len());
                    gram.push_str(prefix);
                    gram.push_str(symbol);
                    next.push(gram);
                }
            }
            current = next;
        }

        Ok(Self::new(current))
    }

    /// Check whether `symbol` belongs to this alphabet.
    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Position of `symbol` in the alphabet's order.
    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.index.get(symbol).copied()
    }

    /// Symbols in order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Iterate over the symbols in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The character length shared by every symbol, if there is one.
    pub fn symbol_len(&self) -> Option<usize> {
        let mut lengths = self.symbols.iter().map(|s| s.chars().count());
        let first = lengths.next()?;
        lengths.all(|len| len == first).then_some(first)
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl From<Vec<String>> for Alphabet {
    fn from(symbols: Vec<String>) -> Self {
        Self::new(symbols)
    }
}

impl From<Alphabet> for Vec<String> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols
    }
}

impl<S: Into<String>> FromIterator<S> for Alphabet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
