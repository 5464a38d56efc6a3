//! Cost models for the alignment engine.

use serde::{Deserialize, Serialize};

use crate::error::{LexmatchError, Result};

/// Whether the engine looks for the cheapest or the highest-scoring path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Edit distance: lower totals are better.
    #[default]
    Minimize,
    /// Similarity alignment: higher totals are better.
    Maximize,
}

impl Objective {
    /// Pick the preferred of two totals.
    pub fn select(self, a: f64, b: f64) -> f64 {
        match self {
            Objective::Minimize => a.min(b),
            Objective::Maximize => a.max(b),
        }
    }
}

/// Costs for the four alignment operations.
///
/// * `insertion` - consume a symbol of the second sequence only
/// * `deletion` - consume a symbol of the first sequence only
/// * `transform` - pair two differing symbols
/// * `skip` - pair two equal symbols
///
/// Insertion and deletion are required. Without `transform`, differing
/// symbols are never paired; without `skip`, equal symbols are never paired.
///
/// # Examples
///
/// ```
/// use lexmatch::alignment::{CostModel, Objective};
///
/// let model = CostModel::sequence_alignment(1.0, -1.0, -2.0);
/// assert_eq!(model.skip, Some(1.0));
/// assert_eq!(model.objective, Objective::Maximize);
///
/// let custom = CostModel::new(Objective::Minimize)
///     .with_insertion(1.0)
///     .with_deletion(1.0)
///     .with_transform(2.0);
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CostModel {
    /// Cost of inserting a symbol from the second sequence.
    pub insertion: Option<f64>,
    /// Cost of deleting a symbol from the first sequence.
    pub deletion: Option<f64>,
    /// Cost of pairing two differing symbols.
    pub transform: Option<f64>,
    /// Cost (or reward) of pairing two equal symbols.
    pub skip: Option<f64>,
    /// Minimize for distances, maximize for similarity scores.
    pub objective: Objective,
}

impl CostModel {
    /// An empty cost model with the given objective.
    pub fn new(objective: Objective) -> Self {
        CostModel {
            objective,
            ..Default::default()
        }
    }

    /// Levenshtein distance: unit insertion, deletion and transform, free skip.
    pub fn levenshtein() -> Self {
        CostModel {
            insertion: Some(1.0),
            deletion: Some(1.0),
            transform: Some(1.0),
            skip: Some(0.0),
            objective: Objective::Minimize,
        }
    }

    /// Sequence alignment score with a match reward, a mismatch penalty and a
    /// gap penalty used for both insertion and deletion.
    pub fn sequence_alignment(match_score: f64, mismatch: f64, gap: f64) -> Self {
        CostModel {
            insertion: Some(gap),
            deletion: Some(gap),
            transform: Some(mismatch),
            skip: Some(match_score),
            objective: Objective::Maximize,
        }
    }

    pub fn with_insertion(mut self, cost: f64) -> Self {
        self.insertion = Some(cost);
        self
    }

    pub fn with_deletion(mut self, cost: f64) -> Self {
        self.deletion = Some(cost);
        self
    }

    pub fn with_transform(mut self, cost: f64) -> Self {
        self.transform = Some(cost);
        self
    }

    pub fn with_skip(mut self, cost: f64) -> Self {
        self.skip = Some(cost);
        self
    }

    /// Check that the model can drive the engine.
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    pub(crate) fn resolve(&self) -> Result<ResolvedCosts> {
        let insertion = self.insertion.ok_or_else(|| {
            LexmatchError::invalid_argument("cost model is missing an insertion cost")
        })?;
        let deletion = self.deletion.ok_or_else(|| {
            LexmatchError::invalid_argument("cost model is missing a deletion cost")
        })?;

        let named = [
            ("insertion", Some(insertion)),
            ("deletion", Some(deletion)),
            ("transform", self.transform),
            ("skip", self.skip),
        ];
        for (name, cost) in named {
            if let Some(cost) = cost
                && !cost.is_finite()
            {
                return Err(LexmatchError::invalid_argument(format!(
                    "{name} cost must be finite, got {cost}"
                )));
            }
        }

        Ok(ResolvedCosts {
            insertion,
            deletion,
            transform: self.transform,
            skip: self.skip,
            objective: self.objective,
        })
    }

    /// Whether swapping the two input sequences leaves every score unchanged.
    pub fn is_symmetric(&self) -> bool {
        self.insertion == self.deletion
    }
}

/// A validated cost model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedCosts {
    pub insertion: f64,
    pub deletion: f64,
    pub transform: Option<f64>,
    pub skip: Option<f64>,
    pub objective: Objective,
}

impl ResolvedCosts {
    /// Cost of pairing `a` with `b`, if the model allows it.
    pub fn diagonal(&self, a: char, b: char) -> Option<f64> {
        if a == b { self.skip } else { self.transform }
    }

    /// The same model seen from the other sequence's side.
    pub fn transposed(&self) -> Self {
        ResolvedCosts {
            insertion: self.deletion,
            deletion: self.insertion,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_costs() {
        let model = CostModel::new(Objective::Minimize).with_deletion(1.0);
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("insertion"));

        let model = CostModel::new(Objective::Minimize).with_insertion(1.0);
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("deletion"));

        let model = CostModel::new(Objective::Minimize)
            .with_insertion(1.0)
            .with_deletion(1.0);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_non_finite_costs_rejected() {
        let model = CostModel::levenshtein().with_transform(f64::NAN);
        assert!(model.validate().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_transposed_swaps_gap_costs() {
        let costs = CostModel::new(Objective::Minimize)
            .with_insertion(1.0)
            .with_deletion(3.0)
            .resolve()
            .unwrap();
        let transposed = costs.transposed();
        assert_eq!(transposed.insertion, 3.0);
        assert_eq!(transposed.deletion, 1.0);
    }

    #[test]
    fn test_objective_select() {
        assert_eq!(Objective::Minimize.select(1.0, 2.0), 1.0);
        assert_eq!(Objective::Maximize.select(1.0, 2.0), 2.0);
    }
}
