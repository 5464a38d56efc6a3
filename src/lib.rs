//! # Lexmatch
//!
//! String comparison and classification for short strings such as names,
//! words and domain labels.
//!
//! ## Features
//!
//! - Edit distance and sequence alignment from one parameterized engine
//! - Character n-gram distributions with Laplace smoothing
//! - Jaccard, Kullback-Leibler and Bhattacharyya distances
//! - Arena-backed trie with substring search
//! - Markov, length and composite matchers
//! - Naive Bayes and matcher-ranking classifiers

pub mod alignment;
pub mod alphabet;
pub mod classifier;
pub mod distance;
pub mod error;
pub mod matcher;
pub mod ngram;
pub mod trie;

pub mod prelude {
    pub use crate::alignment::{Alignment, AlignmentEngine, CostModel, Objective};
    pub use crate::alphabet::Alphabet;
    pub use crate::classifier::{
        Classification, Classifier, LanguageClassifier, NaiveBayesClassifier, NaiveBayesConfig,
        Prediction, Prior,
    };
    pub use crate::distance::DivergenceMetric;
    pub use crate::error::{LexmatchError, Result};
    pub use crate::matcher::{
        CombineMode, CompositeMatcher, Decision, LengthMatcher, MarkovMatcher,
        MarkovMatcherConfig, Matcher,
    };
    pub use crate::ngram::{FrequencyDistribution, NgramModel};
    pub use crate::trie::{SubstringMatcher, Trie};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
