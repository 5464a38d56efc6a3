//! Ranking words and texts against named matchers.

use std::fmt;

use log::debug;

use crate::classifier::{Classification, Classifier, Prediction, best_of};
use crate::error::{LexmatchError, Result};
use crate::matcher::Matcher;

/// Classifies words and texts by asking each named matcher how probable a
/// match is and picking the most probable name.
///
/// Text scores are the per-category mean over the whitespace-separated words
/// of the text. Ties go to the earliest registered category.
///
/// ```
/// use lexmatch::classifier::LanguageClassifier;
/// use lexmatch::matcher::{MarkovMatcher, MarkovMatcherConfig};
///
/// let maori = MarkovMatcher::new(MarkovMatcherConfig::default(), ["kia", "ora", "whanau"]).unwrap();
/// let english = MarkovMatcher::new(MarkovMatcherConfig::default(), ["the", "there", "with"]).unwrap();
///
/// let mut classifier = LanguageClassifier::new();
/// classifier.add_matcher("maori", Box::new(maori)).unwrap();
/// classifier.add_matcher("english", Box::new(english)).unwrap();
///
/// let (label, _) = classifier.classify_word("ora").unwrap().unwrap();
/// assert_eq!(label, "maori");
/// ```
#[derive(Default)]
pub struct LanguageClassifier {
    categories: Vec<(String, Box<dyn Matcher>)>,
}

impl fmt::Debug for LanguageClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.labels();
        f.debug_struct("LanguageClassifier")
            .field("categories", &names)
            .finish()
    }
}

impl LanguageClassifier {
    /// Create a classifier with no categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `matcher` under `label`. Labels must be unique.
    pub fn add_matcher<L: Into<String>>(
        &mut self,
        label: L,
        matcher: Box<dyn Matcher>,
    ) -> Result<()> {
        let label = label.into();
        if self.categories.iter().any(|(existing, _)| *existing == label) {
            return Err(LexmatchError::invalid_argument(format!(
                "duplicate category label: {label}"
            )));
        }
        debug!("registered category {label} using {} matcher", matcher.name());
        self.categories.push((label, matcher));
        Ok(())
    }

    /// Builder form of [`add_matcher`](Self::add_matcher).
    pub fn with_matcher<L: Into<String>>(
        mut self,
        label: L,
        matcher: Box<dyn Matcher>,
    ) -> Result<Self> {
        self.add_matcher(label, matcher)?;
        Ok(self)
    }

    /// Category labels in registration order.
    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Match probability of `word` for every category.
    pub fn classify_word_all(&self, word: &str) -> Result<Vec<(String, f64)>> {
        self.categories
            .iter()
            .map(|(label, matcher)| Ok((label.clone(), matcher.match_probability(word)?)))
            .collect()
    }

    /// The most probable category for `word`, or `None` without categories.
    pub fn classify_word(&self, word: &str) -> Result<Option<(String, f64)>> {
        Ok(best_of(&self.classify_word_all(word)?))
    }

    /// Mean match probability per category over the words of `text`.
    ///
    /// A text without words scores 0.0 in every category.
    pub fn classify_text_all(&self, text: &str) -> Result<Vec<(String, f64)>> {
        let mut totals: Vec<(String, f64)> = self
            .categories
            .iter()
            .map(|(label, _)| (label.clone(), 0.0))
            .collect();

        let mut words = 0usize;
        for word in text.split_whitespace() {
            words += 1;
            for ((_, total), (_, matcher)) in totals.iter_mut().zip(&self.categories) {
                *total += matcher.match_probability(word)?;
            }
        }

        if words > 0 {
            for (_, total) in totals.iter_mut() {
                *total /= words as f64;
            }
        }
        Ok(totals)
    }

    /// The category with the highest mean probability over the words of
    /// `text`, or `None` when there are no categories or no words.
    pub fn classify_text(&self, text: &str) -> Result<Option<(String, f64)>> {
        if text.split_whitespace().next().is_none() {
            return Ok(None);
        }
        Ok(best_of(&self.classify_text_all(text)?))
    }
}

impl Classifier for LanguageClassifier {
    fn classify(&self, text: &str) -> Result<Prediction> {
        Ok(match self.classify_text(text)? {
            Some((label, score)) => Prediction::Class(Classification { label, score }),
            None => Prediction::NoDecision,
        })
    }

    fn classify_all(&self, text: &str) -> Result<Vec<(String, f64)>> {
        self.classify_text_all(text)
    }

    fn name(&self) -> &str {
        "language"
    }
}
