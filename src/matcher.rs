//! Boolean string matchers.
//!
//! A [`Matcher`] answers whether a string belongs to some category and how
//! probable that membership is. Every matcher can be inverted, which flips
//! its boolean answer. Matchers compose through [`CompositeMatcher`] and are
//! ranked against each other by
//! [`LanguageClassifier`](crate::classifier::LanguageClassifier).

pub mod composite;
pub mod length;
pub mod markov;

use serde::{Deserialize, Serialize};

pub use composite::{CombineMode, CompositeMatcher};
pub use length::LengthMatcher;
pub use markov::{MarkovMatcher, MarkovMatcherConfig};

use crate::error::Result;

/// Matcher trait.
///
/// Implementations decide membership for single strings. Batch and
/// whole-text forms are provided on top of the two per-string operations.
pub trait Matcher: Send + Sync {
    /// Whether `text` matches, after inversion.
    fn is_match(&self, text: &str) -> Result<bool>;

    /// Probability in `[0, 1]` that `text` belongs to the matched category.
    ///
    /// Inversion does not affect this value.
    fn match_probability(&self, text: &str) -> Result<f64>;

    /// Flip the boolean result of this matcher.
    fn invert(&mut self);

    fn is_inverted(&self) -> bool;

    /// Get the name of this matcher for debugging and logging.
    fn name(&self) -> &str;

    /// [`is_match`](Self::is_match) for every input, in order.
    fn match_all(&self, texts: &[&str]) -> Result<Vec<bool>> {
        texts.iter().map(|text| self.is_match(text)).collect()
    }

    /// [`match_probability`](Self::match_probability) for every input, in order.
    fn match_probabilities(&self, texts: &[&str]) -> Result<Vec<f64>> {
        texts.iter().map(|text| self.match_probability(text)).collect()
    }

    /// Fraction of the whitespace-separated words of `text` that match.
    ///
    /// A text without words gives 0.0.
    fn match_text_probability(&self, text: &str) -> Result<f64> {
        let mut total = 0usize;
        let mut matched = 0usize;
        for word in text.split_whitespace() {
            total += 1;
            if self.is_match(word)? {
                matched += 1;
            }
        }

        if total == 0 {
            return Ok(0.0);
        }
        Ok(matched as f64 / total as f64)
    }
}

/// Outcome of a matcher's override rules.
///
/// `Undecided` means no rule fired and the decision falls through to the
/// probability threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Decision {
    Match,
    NoMatch,
    #[default]
    Undecided,
}

impl Decision {
    /// `Match` for true, `NoMatch` for false.
    pub fn from_bool(matched: bool) -> Self {
        if matched {
            Decision::Match
        } else {
            Decision::NoMatch
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Decision::Undecided)
    }

    /// The forced answer, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Decision::Match => Some(true),
            Decision::NoMatch => Some(false),
            Decision::Undecided => None,
        }
    }
}
