//! Character-transition (first-order Markov) matcher.

use ahash::{AHashMap, AHashSet};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{LexmatchError, Result};
use crate::matcher::length::length_stats;
use crate::matcher::{Decision, Matcher};
use crate::trie::Trie;

/// Configuration for [`MarkovMatcher`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkovMatcherConfig {
    /// Minimum match probability for a string to match (0.0 to 1.0).
    pub threshold: f64,
    /// Whether the probability measures membership (true) or its complement.
    pub inclusive: bool,
    /// Whether the boolean result is flipped.
    pub inverted: bool,
    /// Whether to keep case when training and matching.
    pub case_sensitive: bool,
    /// Reject strings whose length is more than this many standard deviations
    /// from the mean training-word length.
    pub length_stdevs: Option<f64>,
}

impl Default for MarkovMatcherConfig {
    fn default() -> Self {
        MarkovMatcherConfig {
            threshold: 0.5,
            inclusive: true,
            inverted: false,
            case_sensitive: false,
            length_stdevs: None,
        }
    }
}

impl MarkovMatcherConfig {
    /// Check that the threshold and length filter width are usable.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(LexmatchError::invalid_argument(format!(
                "threshold must be between 0 and 1, got {}",
                self.threshold
            )));
        }
        if let Some(k) = self.length_stdevs
            && (!k.is_finite() || k < 0.0)
        {
            return Err(LexmatchError::invalid_argument(format!(
                "length_stdevs must be a non-negative number, got {k}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct TrieOverride {
    trie: Trie,
    decision: Decision,
}

/// Matches strings by how closely their character transitions follow those
/// of a training corpus.
///
/// The raw probability of a string is the mean of `P(next | prev)` over its
/// consecutive character pairs. Before that is consulted, up to three
/// override rules may force a decision, in this order:
///
/// 1. the length filter rejects strings of unusual length,
/// 2. the substring override fires when a stored word occurs in the string,
/// 3. the word override fires when the string is a stored word.
///
/// # Examples
///
/// ```
/// use lexmatch::matcher::{MarkovMatcher, MarkovMatcherConfig, Matcher};
///
/// let matcher = MarkovMatcher::new(MarkovMatcherConfig::default(), ["abab", "abba"]).unwrap();
/// assert_eq!(matcher.raw_probability("ab"), 1.0);
/// assert!(matcher.is_match("abab").unwrap());
/// assert!(!matcher.is_match("aaaa").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct MarkovMatcher {
    config: MarkovMatcherConfig,
    transitions: AHashMap<char, AHashMap<char, f64>>,
    seen: AHashSet<char>,
    length_bounds: Option<(f64, f64)>,
    substring_override: Option<TrieOverride>,
    word_override: Option<TrieOverride>,
}

impl MarkovMatcher {
    /// Create a matcher and train it on `corpus`.
    pub fn new<I, S>(config: MarkovMatcherConfig, corpus: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        config.validate()?;
        let mut matcher = MarkovMatcher {
            config,
            transitions: AHashMap::new(),
            seen: AHashSet::new(),
            length_bounds: None,
            substring_override: None,
            word_override: None,
        };
        matcher.train(corpus);
        Ok(matcher)
    }

    fn normalize(&self, text: &str) -> String {
        if self.config.case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    }

    /// Replace all learned state with statistics from `corpus`.
    ///
    /// Overrides are configuration, not learned state, and are kept.
    pub fn train<I, S>(&mut self, corpus: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = corpus
            .into_iter()
            .map(|word| self.normalize(word.as_ref()))
            .collect();

        let mut counts: AHashMap<char, AHashMap<char, f64>> = AHashMap::new();
        let mut seen = AHashSet::new();
        for word in &words {
            let chars: Vec<char> = word.chars().collect();
            seen.extend(chars.iter().copied());
            for pair in chars.windows(2) {
                *counts.entry(pair[0]).or_default().entry(pair[1]).or_insert(0.0) += 1.0;
            }
        }

        for successors in counts.values_mut() {
            let total: f64 = successors.values().sum();
            for value in successors.values_mut() {
                *value /= total;
            }
        }

        self.length_bounds = match (self.config.length_stdevs, length_stats(&words)) {
            (Some(k), Some((mean, stdev))) => Some((mean - k * stdev, mean + k * stdev)),
            (Some(_), None) => {
                warn!("length filter configured but training corpus is empty; filter disabled");
                None
            }
            (None, _) => None,
        };

        if words.is_empty() {
            warn!("Markov matcher trained on an empty corpus; every string will score 0");
        }
        debug!(
            "Markov matcher trained on {} words: {} source characters, {} seen characters",
            words.len(),
            counts.len(),
            seen.len()
        );

        self.transitions = counts;
        self.seen = seen;
    }

    /// Force `decision` for any string containing one of `words`.
    pub fn with_substring_override<I, S>(mut self, words: I, decision: Decision) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.substring_override = Some(self.build_override(words, decision)?);
        Ok(self)
    }

    /// Force `decision` for any string that is exactly one of `words`.
    pub fn with_word_override<I, S>(mut self, words: I, decision: Decision) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.word_override = Some(self.build_override(words, decision)?);
        Ok(self)
    }

    fn build_override<I, S>(&self, words: I, decision: Decision) -> Result<TrieOverride>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !decision.is_decided() {
            return Err(LexmatchError::invalid_argument(
                "an override must force Match or NoMatch",
            ));
        }
        let trie = words
            .into_iter()
            .map(|word| self.normalize(word.as_ref()))
            .collect();
        Ok(TrieOverride { trie, decision })
    }

    pub fn config(&self) -> &MarkovMatcherConfig {
        &self.config
    }

    /// Trained `P(next | prev)`, or 0.0 for an unseen transition.
    pub fn transition_probability(&self, prev: char, next: char) -> f64 {
        self.transitions
            .get(&prev)
            .and_then(|successors| successors.get(&next))
            .copied()
            .unwrap_or(0.0)
    }

    /// Mean transition probability of `text`, ignoring overrides and the
    /// inclusion flag.
    ///
    /// Empty strings score 0. A single character scores 1 if it occurred
    /// anywhere in the training corpus and 0 otherwise.
    pub fn raw_probability(&self, text: &str) -> f64 {
        let chars: Vec<char> = self.normalize(text).chars().collect();
        match chars.len() {
            0 => 0.0,
            1 => {
                if self.seen.contains(&chars[0]) {
                    1.0
                } else {
                    0.0
                }
            }
            len => {
                let sum: f64 = chars
                    .windows(2)
                    .map(|pair| self.transition_probability(pair[0], pair[1]))
                    .sum();
                sum / (len - 1) as f64
            }
        }
    }

    /// Run the override rules on `text` without computing probabilities.
    pub fn decide(&self, text: &str) -> Decision {
        let normalized = self.normalize(text);

        if let Some((min, max)) = self.length_bounds {
            let len = normalized.chars().count() as f64;
            if len < min || len > max {
                trace!("length {len} outside [{min}, {max}]: forcing no match");
                return Decision::NoMatch;
            }
        }

        if let Some(rule) = &self.substring_override
            && rule.trie.contains_substring(&normalized)
        {
            trace!("substring override fired for {normalized:?}");
            return rule.decision;
        }

        if let Some(rule) = &self.word_override
            && rule.trie.contains(&normalized)
        {
            trace!("word override fired for {normalized:?}");
            return rule.decision;
        }

        Decision::Undecided
    }

    /// Whether the fraction of matching words in `text` reaches the
    /// threshold, after inversion.
    ///
    /// Inversion applies twice on an inverted matcher: each word's
    /// [`is_match`](Matcher::is_match) is already inverted, so the fraction
    /// counts the words that do *not* fit the model, and the comparison with
    /// the threshold is then flipped again. An inverted matcher therefore
    /// accepts text where fewer than `threshold` of the words are outliers,
    /// including text with no words at all.
    pub fn match_text(&self, text: &str) -> Result<bool> {
        let fraction = self.match_text_probability(text)?;
        Ok((fraction >= self.config.threshold) != self.config.inverted)
    }
}

impl Matcher for MarkovMatcher {
    fn is_match(&self, text: &str) -> Result<bool> {
        let matched = match self.decide(text).as_bool() {
            Some(forced) => forced,
            None => self.match_probability(text)? >= self.config.threshold,
        };
        Ok(matched != self.config.inverted)
    }

    /// The raw probability, complemented when the matcher is not inclusive.
    ///
    /// A forced decision yields 1.0 for `Match` and 0.0 for `NoMatch`.
    fn match_probability(&self, text: &str) -> Result<f64> {
        if let Some(forced) = self.decide(text).as_bool() {
            return Ok(if forced { 1.0 } else { 0.0 });
        }

        let raw = self.raw_probability(text);
        Ok(if self.config.inclusive { raw } else { 1.0 - raw })
    }

    fn invert(&mut self) {
        self.config.inverted = !self.config.inverted;
    }

    fn is_inverted(&self) -> bool {
        self.config.inverted
    }

    fn name(&self) -> &str {
        "markov"
    }
}
