//! Naive Bayes classification over character n-grams.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::classifier::{Classification, Classifier, Prediction, best_of};
use crate::error::{LexmatchError, Result};
use crate::ngram::{FrequencyDistribution, NgramModel};

/// Class prior used by [`NaiveBayesClassifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Prior {
    /// Every class is equally likely.
    #[default]
    Uniform,
    /// Proportional to the number of training examples in each class.
    Proportional,
}

/// Configuration for [`NaiveBayesClassifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// N-gram length (at least 1).
    pub degree: usize,
    /// Class prior.
    pub prior: Prior,
    /// Whether to keep case when training and classifying.
    pub case_sensitive: bool,
    /// N-grams to smooth over. Defaults to every n-gram seen in training.
    pub alphabet: Option<Alphabet>,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        NaiveBayesConfig {
            degree: 2,
            prior: Prior::Uniform,
            case_sensitive: false,
            alphabet: None,
        }
    }
}

impl NaiveBayesConfig {
    pub fn validate(&self) -> Result<()> {
        if self.degree == 0 {
            return Err(LexmatchError::invalid_argument(
                "n-gram degree must be at least 1",
            ));
        }
        if let Some(alphabet) = &self.alphabet
            && alphabet.symbol_len() != Some(self.degree)
        {
            return Err(LexmatchError::invalid_argument(format!(
                "alphabet must be non-empty and contain n-grams of length {}",
                self.degree
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct ClassModel {
    label: String,
    log_prior: f64,
    distribution: FrequencyDistribution,
}

/// Multinomial naive Bayes over character n-grams with Laplace smoothing.
///
/// Every class distribution is smoothed over one shared alphabet, so every
/// n-gram of that alphabet has non-zero likelihood in every class. N-grams
/// outside the alphabet carry no evidence.
///
/// # Examples
///
/// ```
/// use lexmatch::classifier::{NaiveBayesClassifier, NaiveBayesConfig};
///
/// let classifier = NaiveBayesClassifier::train(
///     NaiveBayesConfig::default(),
///     [
///         ("english", vec!["the", "there", "then", "other"]),
///         ("maori", vec!["kia", "ora", "whanau", "marae"]),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(classifier.classify("thether").label(), Some("english"));
/// assert_eq!(classifier.classify("kiaora").label(), Some("maori"));
/// ```
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    config: NaiveBayesConfig,
    model: NgramModel,
    alphabet: Alphabet,
    classes: Vec<ClassModel>,
    global: FrequencyDistribution,
}

impl NaiveBayesClassifier {
    /// Train on ordered `(label, corpus)` pairs.
    ///
    /// Labels must be unique and there must be at least one class. Ties
    /// between classes are later resolved in favour of the earlier label.
    pub fn train<I, L, C, S>(config: NaiveBayesConfig, classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, C)>,
        L: Into<String>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        config.validate()?;
        let model = NgramModel::new(config.degree)?;

        let mut labels = AHashSet::new();
        let mut counted: Vec<(String, usize, FrequencyDistribution)> = Vec::new();
        for (label, corpus) in classes {
            let label = label.into();
            if !labels.insert(label.clone()) {
                return Err(LexmatchError::invalid_argument(format!(
                    "duplicate class label: {label}"
                )));
            }

            let words: Vec<String> = corpus
                .into_iter()
                .map(|word| normalize(&config, word.as_ref()))
                .collect();
            let counts = model.corpus_frequency(&words)?;
            counted.push((label, words.len(), counts));
        }

        if counted.is_empty() {
            return Err(LexmatchError::invalid_argument(
                "naive Bayes needs at least one class",
            ));
        }

        let alphabet = match &config.alphabet {
            Some(alphabet) => alphabet.clone(),
            None => {
                let observed: BTreeSet<&str> = counted
                    .iter()
                    .flat_map(|(_, _, counts)| counts.symbols())
                    .collect();
                Alphabet::new(observed)
            }
        };
        if alphabet.is_empty() {
            return Err(LexmatchError::invalid_argument(format!(
                "training data contains no n-grams of length {}",
                config.degree
            )));
        }

        let mut global = FrequencyDistribution::new();
        for (_, _, counts) in &counted {
            for (symbol, count) in counts.iter() {
                global.add(symbol, count);
            }
        }
        global.normalize();

        let total_examples: usize = counted.iter().map(|(_, examples, _)| examples).sum();
        let class_count = counted.len() as f64;

        let classes: Vec<ClassModel> = counted
            .into_iter()
            .map(|(label, examples, counts)| {
                let prior = match config.prior {
                    Prior::Uniform => 1.0 / class_count,
                    Prior::Proportional if total_examples > 0 => {
                        examples as f64 / total_examples as f64
                    }
                    Prior::Proportional => 1.0 / class_count,
                };

                let distribution = FrequencyDistribution::from_counts(
                    alphabet
                        .iter()
                        .map(|symbol| (symbol, counts.get(symbol) + 1.0)),
                )
                .normalized();

                ClassModel {
                    label,
                    log_prior: prior.ln(),
                    distribution,
                }
            })
            .collect();

        debug!(
            "naive Bayes trained: {} classes, {} examples, alphabet of {} {}-grams",
            classes.len(),
            total_examples,
            alphabet.len(),
            config.degree
        );

        Ok(NaiveBayesClassifier {
            config,
            model,
            alphabet,
            classes,
            global,
        })
    }

    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    /// The shared smoothing alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Class labels in registration order.
    pub fn labels(&self) -> Vec<&str> {
        self.classes.iter().map(|class| class.label.as_str()).collect()
    }

    /// Probability of `ngram` over the whole training set, unsmoothed.
    pub fn ngram_probability(&self, ngram: &str) -> f64 {
        self.global.get(ngram)
    }

    /// Smoothed `P(ngram | label)`, or `None` for an unknown label.
    pub fn class_probability(&self, label: &str, ngram: &str) -> Option<f64> {
        self.classes
            .iter()
            .find(|class| class.label == label)
            .map(|class| class.distribution.get(ngram))
    }

    /// Posterior probability of every class for `text`, in registration order.
    ///
    /// `None` when `text` has no n-gram from the alphabet.
    pub fn classify_all(&self, text: &str) -> Option<Vec<(String, f64)>> {
        let normalized = normalize(&self.config, text);
        let mut occurrences: BTreeMap<String, usize> = BTreeMap::new();
        for gram in self.model.ngrams(&normalized) {
            if self.alphabet.contains(&gram) {
                *occurrences.entry(gram).or_insert(0) += 1;
            }
        }
        if occurrences.is_empty() {
            return None;
        }

        // Each occurrence contributes prior * likelihood.
        let log_scores: Vec<f64> = self
            .classes
            .iter()
            .map(|class| {
                occurrences
                    .iter()
                    .map(|(gram, count)| {
                        *count as f64 * (class.log_prior + class.distribution.get(gram).ln())
                    })
                    .sum()
            })
            .collect();

        let max = log_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = log_scores.iter().map(|score| (score - max).exp()).collect();
        let total: f64 = weights.iter().sum();

        Some(
            self.classes
                .iter()
                .zip(weights)
                .map(|(class, weight)| (class.label.clone(), weight / total))
                .collect(),
        )
    }

    /// The most probable class for `text`.
    ///
    /// Strings shorter than the degree, or without any n-gram from the
    /// alphabet, give [`Prediction::NoDecision`].
    pub fn classify(&self, text: &str) -> Prediction {
        match self.classify_all(text).as_deref().and_then(best_of) {
            Some((label, score)) => Prediction::Class(Classification { label, score }),
            None => Prediction::NoDecision,
        }
    }

    /// Fraction of `(text, expected_label)` examples classified correctly.
    ///
    /// `NoDecision` counts as a miss.
    pub fn test<I, T, L>(&self, examples: I) -> Result<f64>
    where
        I: IntoIterator<Item = (T, L)>,
        T: AsRef<str>,
        L: AsRef<str>,
    {
        let mut total = 0usize;
        let mut correct = 0usize;
        for (text, expected) in examples {
            total += 1;
            if self.classify(text.as_ref()).label() == Some(expected.as_ref()) {
                correct += 1;
            }
        }

        if total == 0 {
            return Err(LexmatchError::invalid_argument(
                "cannot measure accuracy on an empty example set",
            ));
        }
        Ok(correct as f64 / total as f64)
    }
}

fn normalize(config: &NaiveBayesConfig, text: &str) -> String {
    if config.case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

impl Classifier for NaiveBayesClassifier {
    fn classify(&self, text: &str) -> Result<Prediction> {
        Ok(NaiveBayesClassifier::classify(self, text))
    }

    fn classify_all(&self, text: &str) -> Result<Vec<(String, f64)>> {
        Ok(NaiveBayesClassifier::classify_all(self, text).unwrap_or_default())
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }
}
