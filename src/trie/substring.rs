//! Multi-pattern substring search over a fixed word list.

use aho_corasick::{AhoCorasick, MatchKind};

use crate::error::{LexmatchError, Result};

/// An Aho–Corasick automaton answering "does any of these words occur in
/// this text" in a single pass over the text.
#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    automaton: AhoCorasick,
    words: Vec<String>,
}

impl SubstringMatcher {
    /// Build an automaton from `words`, ignoring empty strings.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|word: &String| !word.is_empty())
            .collect();

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&words)
            .map_err(|e| LexmatchError::pattern(e.to_string()))?;

        Ok(SubstringMatcher { automaton, words })
    }

    /// Whether any word occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.automaton.is_match(text)
    }

    /// Non-overlapping occurrences in `text`, scanning left to right and
    /// preferring the longest word at each position.
    pub fn find_words(&self, text: &str) -> Vec<&str> {
        self.automaton
            .find_iter(text)
            .map(|m| self.words[m.pattern().as_usize()].as_str())
            .collect()
    }

    /// The words this automaton searches for.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}
