//! Set and distributional distance metrics.
//!
//! Divergences are computed over an explicit [`Alphabet`] that must cover the
//! support of both distributions. Symbols absent from a distribution read as
//! probability 0.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::error::{LexmatchError, Result};
use crate::ngram::{FrequencyDistribution, NgramModel};

/// Jaccard index `|A ∩ B| / |A ∪ B|`; two empty sets are identical (1.0).
///
/// ```
/// use std::collections::BTreeSet;
/// use lexmatch::distance::jaccard;
///
/// let a: BTreeSet<_> = ["a", "b"].into_iter().collect();
/// let b: BTreeSet<_> = ["b", "c"].into_iter().collect();
/// assert!((jaccard(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn jaccard<T: Ord>(first: &BTreeSet<T>, second: &BTreeSet<T>) -> f64 {
    let union = first.union(second).count();
    if union == 0 {
        return 1.0;
    }
    let intersection = first.intersection(second).count();
    intersection as f64 / union as f64
}

/// Jaccard index of the n-gram sets of two strings.
pub fn jaccard_ngrams(first: &str, second: &str, degree: usize) -> Result<f64> {
    let model = NgramModel::new(degree)?;
    Ok(jaccard(&model.ngram_set(first), &model.ngram_set(second)))
}

/// Reject distributions that put mass on symbols `alphabet` does not list.
fn check_support(distribution: &FrequencyDistribution, alphabet: &Alphabet) -> Result<()> {
    match distribution
        .iter()
        .find(|(symbol, value)| *value != 0.0 && !alphabet.contains(symbol))
    {
        Some((symbol, _)) => Err(LexmatchError::domain(format!(
            "symbol '{symbol}' has non-zero probability but is not in the alphabet"
        ))),
        None => Ok(()),
    }
}

/// Kullback-Leibler divergence `Σ p_i ln(p_i / q_i)` over `alphabet`.
///
/// Symbols where `p_i` is zero contribute nothing. A symbol with `p_i > 0`
/// and `q_i == 0` makes the divergence undefined and is reported as a
/// [`LexmatchError::Domain`] naming that symbol, as is mass on a symbol
/// outside `alphabet` in either distribution.
pub fn kullback_leibler(
    p: &FrequencyDistribution,
    q: &FrequencyDistribution,
    alphabet: &Alphabet,
) -> Result<f64> {
    check_support(p, alphabet)?;
    check_support(q, alphabet)?;

    let mut divergence = 0.0;
    for symbol in alphabet.iter() {
        let p_i = p.get(symbol);
        if p_i == 0.0 {
            continue;
        }
        let q_i = q.get(symbol);
        if q_i == 0.0 {
            return Err(LexmatchError::domain(format!(
                "reference probability is zero for symbol '{symbol}'"
            )));
        }
        divergence += p_i * (p_i / q_i).ln();
    }
    Ok(divergence)
}

/// Symmetrized divergence `(KL(p, q) + KL(q, p)) / 2`.
pub fn kullback_leibler_distance(
    p: &FrequencyDistribution,
    q: &FrequencyDistribution,
    alphabet: &Alphabet,
) -> Result<f64> {
    let forward = kullback_leibler(p, q, alphabet)?;
    let backward = kullback_leibler(q, p, alphabet)?;
    Ok(0.5 * (forward + backward))
}

/// Bhattacharyya distance `-ln Σ sqrt(p_i q_i)` over `alphabet`.
///
/// The coefficient is taken over `p` and `q` rescaled to unit mass on
/// `alphabet`, so a distribution is always at distance exactly 0.0 from
/// itself and never at a negative distance. Distributions with no overlap
/// have coefficient 0 and distance 0.0 here rather than infinity. Mass on a
/// symbol outside `alphabet` is a [`LexmatchError::Domain`].
pub fn bhattacharyya(
    p: &FrequencyDistribution,
    q: &FrequencyDistribution,
    alphabet: &Alphabet,
) -> Result<f64> {
    check_support(p, alphabet)?;
    check_support(q, alphabet)?;

    let mut overlap = 0.0;
    let mut p_total = 0.0;
    let mut q_total = 0.0;
    for symbol in alphabet.iter() {
        let (p_i, q_i) = (p.get(symbol), q.get(symbol));
        overlap += (p_i * q_i).sqrt();
        p_total += p_i;
        q_total += q_i;
    }

    // sqrt(x * x) == x, so identical inputs give overlap == scale exactly.
    let scale = (p_total * q_total).sqrt();
    if overlap == 0.0 || scale == 0.0 {
        return Ok(0.0);
    }

    let coefficient = (overlap / scale).min(1.0);
    let distance = -coefficient.ln();
    // -ln(1.0) is -0.0
    Ok(if distance > 0.0 { distance } else { 0.0 })
}

/// Divergence measures between two frequency distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DivergenceMetric {
    /// Asymmetric Kullback-Leibler divergence
    #[default]
    KullbackLeibler,
    /// Symmetrized Kullback-Leibler divergence
    KullbackLeiblerDistance,
    /// Bhattacharyya distance
    Bhattacharyya,
}

impl DivergenceMetric {
    /// Compute the divergence of `p` from `q` over `alphabet`.
    pub fn compute(
        &self,
        p: &FrequencyDistribution,
        q: &FrequencyDistribution,
        alphabet: &Alphabet,
    ) -> Result<f64> {
        match self {
            DivergenceMetric::KullbackLeibler => kullback_leibler(p, q, alphabet),
            DivergenceMetric::KullbackLeiblerDistance => {
                kullback_leibler_distance(p, q, alphabet)
            }
            DivergenceMetric::Bhattacharyya => bhattacharyya(p, q, alphabet),
        }
    }

    /// Whether swapping the arguments leaves the result unchanged.
    pub fn is_symmetric(&self) -> bool {
        !matches!(self, DivergenceMetric::KullbackLeibler)
    }

    /// Get the name of this metric.
    pub fn name(&self) -> &'static str {
        match self {
            DivergenceMetric::KullbackLeibler => "kullback_leibler",
            DivergenceMetric::KullbackLeiblerDistance => "kullback_leibler_distance",
            DivergenceMetric::Bhattacharyya => "bhattacharyya",
        }
    }

    /// Parse a metric from a string.
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "kullback_leibler" | "kl" => Ok(DivergenceMetric::KullbackLeibler),
            "kullback_leibler_distance" | "kl_distance" => {
                Ok(DivergenceMetric::KullbackLeiblerDistance)
            }
            "bhattacharyya" => Ok(DivergenceMetric::Bhattacharyya),
            _ => Err(LexmatchError::invalid_argument(format!(
                "Unknown divergence metric: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::ngram_set;

    fn distribution(pairs: &[(&str, f64)]) -> FrequencyDistribution {
        FrequencyDistribution::from_counts(pairs.iter().map(|(s, v)| (*s, *v)))
    }

    #[test]
    fn test_jaccard_ngrams() {
        assert_eq!(jaccard_ngrams("ab", "ab", 1).unwrap(), 1.0);
        assert_eq!(jaccard_ngrams("ab", "ab", 2).unwrap(), 1.0);
        assert_eq!(jaccard_ngrams("abcd", "efgh", 1).unwrap(), 0.0);
        assert!((jaccard_ngrams("abcd", "abba", 1).unwrap() - 0.5).abs() < 1e-12);
        assert!((jaccard_ngrams("abcd", "abba", 2).unwrap() - 0.2).abs() < 1e-12);
        assert_eq!(jaccard_ngrams("", "", 1).unwrap(), 1.0);
        assert!(jaccard_ngrams("a", "b", 0).is_err());
    }

    #[test]
    fn test_jaccard_sets() {
        let a = ngram_set("night", 2).unwrap();
        let b = ngram_set("nacht", 2).unwrap();
        // {ni, ig, gh, ht} vs {na, ac, ch, ht}
        assert!((jaccard(&a, &b) - 1.0 / 7.0).abs() < 1e-12);
        assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    }

    #[test]
    fn test_kullback_leibler() {
        let alphabet = Alphabet::from_chars("ab");
        let p = distribution(&[("a", 0.5), ("b", 0.5)]);
        let q = distribution(&[("a", 0.25), ("b", 0.75)]);

        let expected = 0.5 * (2.0f64).ln() + 0.5 * (0.5f64 / 0.75).ln();
        assert!((kullback_leibler(&p, &q, &alphabet).unwrap() - expected).abs() < 1e-12);
        assert_eq!(kullback_leibler(&p, &p, &alphabet).unwrap(), 0.0);

        let forward = kullback_leibler(&p, &q, &alphabet).unwrap();
        let backward = kullback_leibler(&q, &p, &alphabet).unwrap();
        assert!((forward - backward).abs() > 1e-6);
        let symmetric = kullback_leibler_distance(&p, &q, &alphabet).unwrap();
        assert!((symmetric - 0.5 * (forward + backward)).abs() < 1e-12);
        assert_eq!(
            symmetric,
            kullback_leibler_distance(&q, &p, &alphabet).unwrap()
        );
    }

    #[test]
    fn test_kullback_leibler_support_mismatch() {
        let alphabet = Alphabet::from_chars("abc");
        let p = distribution(&[("a", 0.5), ("c", 0.5)]);
        let q = distribution(&[("a", 0.5), ("b", 0.5)]);

        let err = kullback_leibler(&p, &q, &alphabet).unwrap_err();
        assert!(err.is_domain());
        assert!(err.to_string().contains("'c'"));

        // p is zero where q is zero: the term is skipped.
        let r = distribution(&[("a", 1.0)]);
        assert!(kullback_leibler(&r, &q, &alphabet).is_ok());
    }

    #[test]
    fn test_bhattacharyya() {
        let alphabet = Alphabet::from_chars("ab");
        let p = distribution(&[("a", 0.5), ("b", 0.5)]);
        let distance = bhattacharyya(&p, &p, &alphabet).unwrap();
        assert_eq!(distance, 0.0);
        assert!(distance.is_sign_positive());

        let q = distribution(&[("a", 0.9), ("b", 0.1)]);
        let expected = -((0.45f64).sqrt() + (0.05f64).sqrt()).ln();
        assert!((bhattacharyya(&p, &q, &alphabet).unwrap() - expected).abs() < 1e-12);

        let disjoint_p = distribution(&[("a", 1.0)]);
        let disjoint_q = distribution(&[("b", 1.0)]);
        assert_eq!(bhattacharyya(&disjoint_p, &disjoint_q, &alphabet).unwrap(), 0.0);
    }

    #[test]
    fn test_bhattacharyya_self_distance_is_exactly_zero() {
        let alphabet = Alphabet::alpha();
        let model = NgramModel::new(1)
            .unwrap()
            .normalize(true)
            .smoothing(alphabet.clone())
            .unwrap();
        for text in ["", "a", "abcdefghij", "theotherbrother"] {
            let p = model.frequency(text).unwrap();
            let distance = bhattacharyya(&p, &p, &alphabet).unwrap();
            assert_eq!(distance, 0.0, "{text}");
            assert!(distance.is_sign_positive());
        }

        // thirds do not sum to exactly 1.0
        let thirds = distribution(&[("a", 1.0 / 3.0), ("b", 1.0 / 3.0), ("c", 1.0 / 3.0)]);
        assert_eq!(bhattacharyya(&thirds, &thirds, &alphabet).unwrap(), 0.0);
    }

    #[test]
    fn test_mass_outside_alphabet_is_a_domain_error() {
        let alphabet = Alphabet::from_chars("ab");
        let inside = distribution(&[("a", 0.5), ("b", 0.5)]);
        let outside = distribution(&[("a", 0.25), ("b", 0.25), ("J", 0.5)]);

        let err = kullback_leibler(&outside, &inside, &alphabet).unwrap_err();
        assert!(err.is_domain());
        assert!(err.to_string().contains("'J'"));
        assert!(kullback_leibler(&inside, &outside, &alphabet).unwrap_err().is_domain());
        assert!(bhattacharyya(&outside, &outside, &alphabet).unwrap_err().is_domain());
        assert!(
            DivergenceMetric::KullbackLeiblerDistance
                .compute(&inside, &outside, &alphabet)
                .is_err()
        );

        // zero mass outside the alphabet is harmless
        let padded = distribution(&[("a", 0.5), ("b", 0.5), ("!", 0.0)]);
        assert_eq!(kullback_leibler(&padded, &inside, &alphabet).unwrap(), 0.0);
    }

    #[test]
    fn test_metric_names() {
        for metric in [
            DivergenceMetric::KullbackLeibler,
            DivergenceMetric::KullbackLeiblerDistance,
            DivergenceMetric::Bhattacharyya,
        ] {
            assert_eq!(DivergenceMetric::parse_str(metric.name()).unwrap(), metric);
        }
        assert_eq!(
            DivergenceMetric::parse_str("KL").unwrap(),
            DivergenceMetric::KullbackLeibler
        );
        assert!(DivergenceMetric::parse_str("hellinger").is_err());
        assert!(!DivergenceMetric::KullbackLeibler.is_symmetric());
    }

    #[test]
    fn test_metric_compute() {
        let alphabet = Alphabet::from_chars("ab");
        let p = distribution(&[("a", 0.5), ("b", 0.5)]);
        let q = distribution(&[("a", 0.9), ("b", 0.1)]);
        assert_eq!(
            DivergenceMetric::Bhattacharyya
                .compute(&p, &q, &alphabet)
                .unwrap(),
            bhattacharyya(&p, &q, &alphabet).unwrap()
        );
    }
}
