//! Edit distance and sequence alignment.
//!
//! Levenshtein distance and alignment similarity scores are the same dynamic
//! program under two [`CostModel`] presets: the first minimizes unit edit
//! costs, the second maximizes match rewards against mismatch and gap
//! penalties. [`AlignmentEngine::align`] additionally recovers the padded
//! pair of sequences along the optimal path.
//!
//! The free functions below mirror the common presets and, like the engine,
//! compare case-insensitively.

pub mod cost_model;
pub mod engine;

pub use cost_model::{CostModel, Objective};
pub use engine::{Alignment, AlignmentEngine};

/// Default reward for two equal symbols in [`seq_align`] and [`alignment`].
pub const DEFAULT_MATCH: f64 = 1.0;
/// Default penalty for two differing symbols.
pub const DEFAULT_MISMATCH: f64 = -1.0;
/// Default penalty for pairing a symbol with padding.
pub const DEFAULT_GAP: f64 = -2.0;
/// Default padding symbol.
pub const DEFAULT_PAD: char = '_';

/// Case-insensitive Levenshtein distance.
///
/// ```
/// assert_eq!(lexmatch::alignment::levenshtein("kitten", "Sitting"), 3);
/// ```
pub fn levenshtein(first: &str, second: &str) -> usize {
    AlignmentEngine::levenshtein().score(first, second) as usize
}

/// Levenshtein similarity between 0.0 and 1.0; two empty strings are identical.
pub fn levenshtein_ratio(first: &str, second: &str) -> f64 {
    let max_len = first.chars().count().max(second.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - (levenshtein(first, second) as f64 / max_len as f64)
}

fn default_alignment_engine() -> AlignmentEngine {
    AlignmentEngine::sequence_alignment(DEFAULT_MATCH, DEFAULT_MISMATCH, DEFAULT_GAP)
}

/// Case-insensitive alignment score with match 1, mismatch -1 and gap -2.
///
/// ```
/// assert_eq!(lexmatch::alignment::seq_align("john", "ohm"), -1.0);
/// ```
pub fn seq_align(first: &str, second: &str) -> f64 {
    default_alignment_engine().score(first, second)
}

/// Case-insensitive optimal alignment with the [`seq_align`] scores, padded with `_`.
///
/// ```
/// let aligned = lexmatch::alignment::alignment("john", "ohm");
/// assert_eq!(aligned.pair(), ("john", "_ohm"));
/// ```
pub fn alignment(first: &str, second: &str) -> Alignment {
    default_alignment_engine().align(first, second, DEFAULT_PAD)
}
