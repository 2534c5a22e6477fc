//! ROC curve construction and area-under-curve scoring.
//!
//! Works on host-side `f64` slices: the caller extracts scores from its
//! tensors once per epoch or reduction, so there is no point keeping this
//! on-device. An example counts as positive when its target is `> 0`,
//! which covers both `{0, 1}` and `{-1, +1}` target encodings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for ranking-metric computations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    /// No examples were supplied.
    #[error("no examples to score")]
    EmptyInput,

    /// Targets and scores disagree in length.
    #[error("targets ({targets}) and scores ({scores}) must have the same length")]
    LengthMismatch {
        /// Number of targets supplied.
        targets: usize,
        /// Number of scores supplied.
        scores: usize,
    },

    /// Only one class is present, so ranking quality is undefined.
    #[error("ROC is undefined when only one class is present")]
    SingleClass,
}

/// A specialized `Result` type for metric computations.
pub type MetricResult<T> = Result<T, MetricError>;

/// Receiver operating characteristic curve.
///
/// Points are ordered by decreasing threshold, starting at the `(0, 0)`
/// origin (threshold `+inf`, nothing predicted positive) and ending at
/// `(1, 1)` (everything predicted positive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    /// False positive rate at each threshold.
    pub fpr: Vec<f64>,
    /// True positive rate at each threshold.
    pub tpr: Vec<f64>,
    /// Decreasing score thresholds, one per operating point.
    pub thresholds: Vec<f64>,
}

/// Computes the ROC curve for binary targets and real-valued scores.
///
/// Tied scores are collapsed into a single operating point, so the curve
/// only has vertices where the threshold actually changes.
///
/// # Errors
///
/// Returns an error when the inputs are empty, their lengths differ, or
/// only one class is present.
pub fn roc_curve(targets: &[f64], scores: &[f64]) -> MetricResult<RocCurve> {
    let (npos, nneg) = validate(targets, scores)?;

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_unstable_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let mut thresholds = vec![f64::INFINITY];

    let mut tp = 0_usize;
    let mut fp = 0_usize;

    for (rank, &idx) in order.iter().enumerate() {
        if targets[idx] > 0.0 {
            tp += 1;
        } else {
            fp += 1;
        }

        // Emit a point only once the run of tied scores ends.
        let next = order.get(rank + 1);
        if next.is_none_or(|&n| scores[n] != scores[idx]) {
            fpr.push(fp as f64 / nneg as f64);
            tpr.push(tp as f64 / npos as f64);
            thresholds.push(scores[idx]);
        }
    }

    Ok(RocCurve {
        fpr,
        tpr,
        thresholds,
    })
}

/// Computes the area under the ROC curve by trapezoidal integration.
///
/// Equivalent to the probability that a uniformly drawn positive example
/// outranks a uniformly drawn negative one, counting ties as half.
///
/// # Errors
///
/// Returns an error when the inputs are empty, their lengths differ, or
/// only one class is present.
pub fn roc_auc_score(targets: &[f64], scores: &[f64]) -> MetricResult<f64> {
    let curve = roc_curve(targets, scores)?;

    let mut auc = 0.0;
    for i in 1..curve.fpr.len() {
        auc += (curve.fpr[i] - curve.fpr[i - 1]) * (curve.tpr[i] + curve.tpr[i - 1]) / 2.0;
    }

    Ok(auc)
}

fn validate(targets: &[f64], scores: &[f64]) -> MetricResult<(usize, usize)> {
    if targets.is_empty() {
        return Err(MetricError::EmptyInput);
    }
    if targets.len() != scores.len() {
        return Err(MetricError::LengthMismatch {
            targets: targets.len(),
            scores: scores.len(),
        });
    }

    let npos = targets.iter().filter(|&&t| t > 0.0).count();
    let nneg = targets.len() - npos;
    if npos == 0 || nneg == 0 {
        return Err(MetricError::SingleClass);
    }

    Ok((npos, nneg))
}
