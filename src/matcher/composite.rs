//! Boolean combination of matchers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LexmatchError, Result};
use crate::matcher::Matcher;

/// How a [`CompositeMatcher`] folds its constituents' answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// Match when any constituent matches
    #[default]
    Or,
    /// Match when every constituent matches
    And,
}

impl CombineMode {
    /// Get the name of this mode.
    pub fn name(&self) -> &'static str {
        match self {
            CombineMode::Or => "or",
            CombineMode::And => "and",
        }
    }

    /// Parse a mode from `"or"` or `"and"`.
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "or" => Ok(CombineMode::Or),
            "and" => Ok(CombineMode::And),
            _ => Err(LexmatchError::invalid_argument(format!(
                "Unknown combination mode: {s} (expected \"or\" or \"and\")"
            ))),
        }
    }
}

/// A matcher built from an ordered list of other matchers.
///
/// Each constituent applies its own inversion; the composite's inversion is
/// applied on top of the folded result.
///
/// ```
/// use lexmatch::matcher::{CombineMode, CompositeMatcher, LengthMatcher, Matcher};
///
/// let short = LengthMatcher::new().with_range(None, Some(3));
/// let long = LengthMatcher::new().with_range(Some(8), None);
/// let matchers: Vec<Box<dyn Matcher>> = vec![Box::new(short), Box::new(long)];
/// let extremes = CompositeMatcher::new(matchers, CombineMode::Or).unwrap();
/// assert!(extremes.is_match("tui").unwrap());
/// assert!(!extremes.is_match("kereru").unwrap());
/// ```
pub struct CompositeMatcher {
    matchers: Vec<Box<dyn Matcher>>,
    mode: CombineMode,
    inverted: bool,
}

impl fmt::Debug for CompositeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.matchers.iter().map(|m| m.name()).collect();
        f.debug_struct("CompositeMatcher")
            .field("matchers", &names)
            .field("mode", &self.mode)
            .field("inverted", &self.inverted)
            .finish()
    }
}

impl CompositeMatcher {
    /// Combine `matchers` under `mode`. The list must not be empty.
    pub fn new(matchers: Vec<Box<dyn Matcher>>, mode: CombineMode) -> Result<Self> {
        if matchers.is_empty() {
            return Err(LexmatchError::invalid_argument(
                "CompositeMatcher needs at least one matcher",
            ));
        }
        Ok(CompositeMatcher {
            matchers,
            mode,
            inverted: false,
        })
    }

    /// Like [`new`](Self::new), taking the mode by name.
    pub fn with_mode_name(matchers: Vec<Box<dyn Matcher>>, mode: &str) -> Result<Self> {
        Self::new(matchers, CombineMode::parse_str(mode)?)
    }

    /// Append another constituent.
    pub fn push(&mut self, matcher: Box<dyn Matcher>) {
        self.matchers.push(matcher);
    }

    pub fn mode(&self) -> CombineMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    fn fold(&self, text: &str) -> Result<bool> {
        for matcher in &self.matchers {
            let matched = matcher.is_match(text)?;
            match self.mode {
                CombineMode::Or if matched => return Ok(true),
                CombineMode::And if !matched => return Ok(false),
                _ => {}
            }
        }
        Ok(self.mode == CombineMode::And)
    }
}

impl Matcher for CompositeMatcher {
    fn is_match(&self, text: &str) -> Result<bool> {
        Ok(self.fold(text)? != self.inverted)
    }

    /// Fraction of constituents that match `text`.
    fn match_probability(&self, text: &str) -> Result<f64> {
        let mut matched = 0usize;
        for matcher in &self.matchers {
            if matcher.is_match(text)? {
                matched += 1;
            }
        }
        Ok(matched as f64 / self.matchers.len() as f64)
    }

    fn invert(&mut self) {
        self.inverted = !self.inverted;
    }

    fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn name(&self) -> &str {
        match self.mode {
            CombineMode::Or => "composite_or",
            CombineMode::And => "composite_and",
        }
    }
}
