//! Dynamic-programming alignment engine.

use serde::{Deserialize, Serialize};

use crate::alignment::cost_model::{CostModel, ResolvedCosts};
use crate::error::Result;

/// The optimal alignment of two sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Total cost or score of the alignment path.
    pub score: f64,
    /// First sequence with padding inserted.
    pub first: String,
    /// Second sequence with padding inserted.
    pub second: String,
}

impl Alignment {
    /// The two padded sequences.
    pub fn pair(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }

    /// Number of aligned positions (both padded sequences have this length).
    pub fn len(&self) -> usize {
        self.first.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}

/// Edit distance and sequence alignment over one parameterized table.
///
/// Cell `(i, j)` holds the best total for the first `i` symbols of the first
/// sequence against the first `j` symbols of the second. It is chosen among
/// a deletion from the cell above, an insertion from the cell to the left and,
/// where the cost model allows it, a skip or transform from the diagonal.
///
/// # Examples
///
/// ```
/// use lexmatch::alignment::{AlignmentEngine, CostModel};
///
/// let engine = AlignmentEngine::new(CostModel::sequence_alignment(1.0, -1.0, -2.0)).unwrap();
/// assert_eq!(engine.score("john", "ohm"), -1.0);
///
/// let alignment = engine.align("john", "ohm", '_');
/// assert_eq!(alignment.pair(), ("john", "_ohm"));
/// ```
#[derive(Debug, Clone)]
pub struct AlignmentEngine {
    model: CostModel,
    costs: ResolvedCosts,
    case_sensitive: bool,
}

impl AlignmentEngine {
    /// Create an engine, rejecting cost models without insertion or deletion.
    pub fn new(model: CostModel) -> Result<Self> {
        let costs = model.resolve()?;
        Ok(AlignmentEngine {
            model,
            costs,
            case_sensitive: false,
        })
    }

    /// An engine computing case-insensitive Levenshtein distance.
    pub fn levenshtein() -> Self {
        let model = CostModel::levenshtein();
        Self::preset(
            model,
            ResolvedCosts {
                insertion: 1.0,
                deletion: 1.0,
                transform: Some(1.0),
                skip: Some(0.0),
                objective: model.objective,
            },
        )
    }

    /// An engine computing case-insensitive alignment scores.
    pub fn sequence_alignment(match_score: f64, mismatch: f64, gap: f64) -> Self {
        let model = CostModel::sequence_alignment(match_score, mismatch, gap);
        Self::preset(
            model,
            ResolvedCosts {
                insertion: gap,
                deletion: gap,
                transform: Some(mismatch),
                skip: Some(match_score),
                objective: model.objective,
            },
        )
    }

    fn preset(model: CostModel, costs: ResolvedCosts) -> Self {
        AlignmentEngine {
            model,
            costs,
            case_sensitive: false,
        }
    }

    /// Compare symbols exactly instead of lowercasing both sequences first.
    ///
    /// Lowercasing maps each `char` to the first `char` of its lowercase form,
    /// so a folded sequence keeps its length and aligned output carries the
    /// folded symbols.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// The cost model this engine was built from.
    pub fn cost_model(&self) -> &CostModel {
        &self.model
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn prepare(&self, sequence: &str) -> Vec<char> {
        if self.case_sensitive {
            sequence.chars().collect()
        } else {
            sequence
                .chars()
                .map(|c| c.to_lowercase().next().unwrap_or(c))
                .collect()
        }
    }

    fn best(costs: &ResolvedCosts, up: f64, left: f64, diagonal: Option<f64>) -> f64 {
        let best = costs.objective.select(up, left);
        match diagonal {
            Some(diagonal) => costs.objective.select(best, diagonal),
            None => best,
        }
    }

    /// Total cost (or score) of the optimal alignment.
    ///
    /// Keeps only two rows laid over the shorter sequence.
    pub fn score(&self, first: &str, second: &str) -> f64 {
        let a = self.prepare(first);
        let b = self.prepare(second);

        // Walking the table transposed swaps the roles of insertion and deletion.
        let (rows, cols, costs) = if b.len() <= a.len() {
            (&a, &b, self.costs)
        } else {
            (&b, &a, self.costs.transposed())
        };

        let mut prev_row = Vec::with_capacity(cols.len() + 1);
        prev_row.push(0.0);
        for j in 1..=cols.len() {
            prev_row.push(prev_row[j - 1] + costs.insertion);
        }
        let mut curr_row = vec![0.0; cols.len() + 1];

        for i in 1..=rows.len() {
            curr_row[0] = prev_row[0] + costs.deletion;

            for j in 1..=cols.len() {
                let diagonal = costs
                    .diagonal(rows[i - 1], cols[j - 1])
                    .map(|cost| prev_row[j - 1] + cost);

                curr_row[j] = Self::best(
                    &costs,
                    prev_row[j] + costs.deletion,    // deletion
                    curr_row[j - 1] + costs.insertion, // insertion
                    diagonal,
                );
            }

            std::mem::swap(&mut prev_row, &mut curr_row);
        }

        prev_row[cols.len()]
    }

    /// Fill the full `(m + 1) x (n + 1)` table.
    #[allow(clippy::needless_range_loop)]
    fn table(&self, a: &[char], b: &[char]) -> Vec<Vec<f64>> {
        let costs = &self.costs;
        let mut matrix = vec![vec![0.0; b.len() + 1]; a.len() + 1];

        for i in 1..=a.len() {
            matrix[i][0] = matrix[i - 1][0] + costs.deletion;
        }
        for j in 1..=b.len() {
            matrix[0][j] = matrix[0][j - 1] + costs.insertion;
        }

        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let diagonal = costs
                    .diagonal(a[i - 1], b[j - 1])
                    .map(|cost| matrix[i - 1][j - 1] + cost);

                matrix[i][j] = Self::best(
                    costs,
                    matrix[i - 1][j] + costs.deletion,
                    matrix[i][j - 1] + costs.insertion,
                    diagonal,
                );
            }
        }

        matrix
    }

    /// Compute the optimal alignment, padding gaps with `pad`.
    ///
    /// The backtrace prefers the diagonal, then a deletion (up), then an
    /// insertion (left), taking the first step whose value reproduces the
    /// cell exactly.
    pub fn align(&self, first: &str, second: &str, pad: char) -> Alignment {
        let a = self.prepare(first);
        let b = self.prepare(second);
        let matrix = self.table(&a, &b);
        let costs = &self.costs;

        let mut first_aligned: Vec<char> = Vec::with_capacity(a.len() + b.len());
        let mut second_aligned: Vec<char> = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (a.len(), b.len());

        while i > 0 || j > 0 {
            let score = matrix[i][j];

            if i > 0
                && j > 0
                && let Some(cost) = costs.diagonal(a[i - 1], b[j - 1])
                && matrix[i - 1][j - 1] + cost == score
            {
                i -= 1;
                j -= 1;
                first_aligned.push(a[i]);
                second_aligned.push(b[j]);
            } else if i > 0 && (j == 0 || matrix[i - 1][j] + costs.deletion == score) {
                i -= 1;
                first_aligned.push(a[i]);
                second_aligned.push(pad);
            } else {
                // Every interior cell reproduces one of its candidates, so the
                // remaining case is an insertion.
                j -= 1;
                first_aligned.push(pad);
                second_aligned.push(b[j]);
            }
        }

        first_aligned.reverse();
        second_aligned.reverse();

        Alignment {
            score: matrix[a.len()][b.len()],
            first: first_aligned.into_iter().collect(),
            second: second_aligned.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::cost_model::Objective;

    fn seq_engine(match_score: f64, mismatch: f64, gap: f64) -> AlignmentEngine {
        AlignmentEngine::new(CostModel::sequence_alignment(match_score, mismatch, gap)).unwrap()
    }

    #[test]
    fn test_levenshtein_scores() {
        let engine = AlignmentEngine::levenshtein();
        assert_eq!(engine.score("", ""), 0.0);
        assert_eq!(engine.score("", "a"), 1.0);
        assert_eq!(engine.score("a", ""), 1.0);
        assert_eq!(engine.score("kitten", "sitting"), 3.0);
        assert_eq!(engine.score("search", "serach"), 2.0);
        assert_eq!(engine.score("Hello", "hello"), 0.0);
        assert_eq!(engine.case_sensitive(true).score("Hello", "hello"), 1.0);
    }

    #[test]
    fn test_sequence_alignment_scores() {
        assert_eq!(seq_engine(1.0, -1.0, -2.0).score("john", "ohm"), -1.0);
        assert_eq!(seq_engine(1.0, -1.0, -2.0).score("john", "john"), 4.0);
        assert_eq!(
            seq_engine(1.0, -1.0, -2.0)
                .case_sensitive(true)
                .score("john", "John"),
            2.0
        );
        assert_eq!(seq_engine(4.0, -5.0, -10.0).score("john", "ohm"), -7.0);
        assert_eq!(
            seq_engine(2.0, -3.0, -5.0)
                .case_sensitive(true)
                .score("john", "JoHn"),
            -2.0
        );
    }

    #[test]
    fn test_alignment_backtrace() {
        let engine = seq_engine(1.0, -1.0, -2.0);
        let alignment = engine.align("john", "ohm", '_');
        assert_eq!(alignment.pair(), ("john", "_ohm"));
        assert_eq!(alignment.score, -1.0);

        let alignment = engine.align("john", "ohm", '&');
        assert_eq!(alignment.pair(), ("john", "&ohm"));
    }

    #[test]
    fn test_case_folding_keeps_sequence_length() {
        let engine = seq_engine(1.0, -1.0, -2.0);
        // 'İ' lowercases to "i\u{307}" as a string
        let alignment = engine.align("İx", "ix", '_');
        assert_eq!(alignment.pair(), ("ix", "ix"));
        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment.score, 2.0);
        assert_eq!(engine.score("İx", "ix"), 2.0);

        let alignment = engine.align("ÅSA", "åsa", '_');
        assert_eq!(alignment.pair(), ("åsa", "åsa"));
    }

    #[test]
    fn test_alignment_against_empty() {
        let engine = seq_engine(1.0, -1.0, -2.0);

        let alignment = engine.align("abc", "", '_');
        assert_eq!(alignment.pair(), ("abc", "___"));
        assert_eq!(alignment.score, -6.0);

        let alignment = engine.align("", "ab", '-');
        assert_eq!(alignment.pair(), ("--", "ab"));

        let alignment = engine.align("", "", '_');
        assert!(alignment.is_empty());
    }

    #[test]
    fn test_asymmetric_gap_costs_match_full_table() {
        let model = CostModel::new(Objective::Minimize)
            .with_insertion(1.0)
            .with_deletion(3.0)
            .with_transform(5.0)
            .with_skip(0.0);
        let engine = AlignmentEngine::new(model).unwrap();

        // The rolling score transposes the table for the longer second input.
        for (a, b) in [("ab", "abcd"), ("abcd", "ab"), ("xyz", "abcxyz")] {
            assert_eq!(engine.score(a, b), engine.align(a, b, '_').score);
        }
        assert_eq!(engine.score("ab", "abcd"), 2.0);
        assert_eq!(engine.score("abcd", "ab"), 6.0);
    }

    #[test]
    fn test_without_transform_only_gaps_pair_differing_symbols() {
        let model = CostModel::new(Objective::Minimize)
            .with_insertion(1.0)
            .with_deletion(1.0)
            .with_skip(0.0);
        let engine = AlignmentEngine::new(model).unwrap();
        assert_eq!(engine.score("a", "b"), 2.0);
        assert_eq!(engine.align("a", "b", '_').pair(), ("_a", "b_"));
    }

    #[test]
    fn test_fractional_costs_backtrace() {
        let model = CostModel::new(Objective::Minimize)
            .with_insertion(0.1)
            .with_deletion(0.1)
            .with_transform(0.3)
            .with_skip(0.0);
        let engine = AlignmentEngine::new(model).unwrap();
        let alignment = engine.align("abcdefghij", "", '_');
        assert_eq!(alignment.second, "__________");
        assert!((alignment.score - 1.0).abs() < 1e-9);
    }
}
