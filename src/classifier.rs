//! Multi-class string classifiers.
//!
//! A [`Classifier`] assigns a string to one of several labelled classes.
//! [`NaiveBayesClassifier`] learns n-gram likelihoods per class;
//! [`LanguageClassifier`] ranks a set of named [`Matcher`](crate::matcher::Matcher)s.

pub mod language;
pub mod naive_bayes;

use serde::{Deserialize, Serialize};

pub use language::LanguageClassifier;
pub use naive_bayes::{NaiveBayesClassifier, NaiveBayesConfig, Prior};

use crate::error::Result;

/// Classifier trait.
pub trait Classifier: Send + Sync {
    /// The most likely class for `text`.
    fn classify(&self, text: &str) -> Result<Prediction>;

    /// Every class with its score, in registration order.
    ///
    /// Empty when the classifier cannot score `text`.
    fn classify_all(&self, text: &str) -> Result<Vec<(String, f64)>>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// A class label with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub score: f64,
}

/// The outcome of classifying one string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Prediction {
    /// The best class.
    Class(Classification),
    /// The input carried no usable evidence.
    NoDecision,
}

impl Prediction {
    /// The predicted label, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Prediction::Class(classification) => Some(&classification.label),
            Prediction::NoDecision => None,
        }
    }

    /// The predicted score, if any.
    pub fn score(&self) -> Option<f64> {
        match self {
            Prediction::Class(classification) => Some(classification.score),
            Prediction::NoDecision => None,
        }
    }

    pub fn is_decided(&self) -> bool {
        matches!(self, Prediction::Class(_))
    }
}

/// Highest-scoring entry; the earliest entry wins ties.
pub(crate) fn best_of(scores: &[(String, f64)]) -> Option<(String, f64)> {
    let mut best: Option<&(String, f64)> = None;
    for entry in scores {
        if best.is_none_or(|current| entry.1 > current.1) {
            best = Some(entry);
        }
    }
    best.cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_of_prefers_first_on_ties() {
        let scores = vec![
            ("maori".to_string(), 0.4),
            ("english".to_string(), 0.7),
            ("samoan".to_string(), 0.7),
        ];
        assert_eq!(best_of(&scores), Some(("english".to_string(), 0.7)));
        assert_eq!(best_of(&[]), None);
    }

    #[test]
    fn test_prediction_accessors() {
        let prediction = Prediction::Class(Classification {
            label: "maori".to_string(),
            score: 0.9,
        });
        assert_eq!(prediction.label(), Some("maori"));
        assert_eq!(prediction.score(), Some(0.9));
        assert!(prediction.is_decided());
        assert_eq!(Prediction::NoDecision.label(), None);
    }
}
