//! Logging statistics carried between workers and their reduction.

use serde::{Deserialize, Serialize};

/// Per-batch statistics emitted by the criterion's forward pass.
///
/// One of these is produced on every data-parallel worker per step; the
/// host framework gathers them and hands the whole collection to
/// [`SimilarityCriterion::reduce_metrics`](crate::SimilarityCriterion::reduce_metrics).
/// Scalar fields sum across workers; the `preds` and `targets` vectors
/// concatenate, which is why logging outputs cannot be pre-summed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimilarityLoggingOutput {
    /// Sum-reduced loss over the batch.
    pub loss: f64,
    /// Token count over both input streams.
    pub ntokens: usize,
    /// Number of sentence pairs in the batch.
    pub nsentences: usize,
    /// Gradient denominator; equals `nsentences` for this criterion.
    pub sample_size: usize,
    /// True positives at the margin threshold.
    pub ncorrect: usize,
    /// Correct predictions at the margin threshold, either class.
    pub ncorrect_total: usize,
    /// Predicted positives at the margin threshold.
    pub ncorrect_pred: usize,
    /// Actual positives at the margin threshold.
    pub ncorrect_actual: usize,
    /// Per-example similarity scores, for epoch-level AUC.
    pub preds: Vec<f64>,
    /// Per-example targets, aligned with `preds`.
    pub targets: Vec<f64>,
}

/// Scalar metrics obtained by reducing logging outputs across workers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedMetrics {
    /// Loss in bits per sample.
    pub loss: f64,
    /// Loss in bits per token; only reported when the sample count and
    /// token count differ.
    pub nll_loss: Option<f64>,
    /// Area under the ROC curve over every gathered prediction.
    pub auc: f64,
    /// Summed gradient denominator, the weight for `loss`.
    pub sample_size: usize,
    /// Summed token count, the weight for `nll_loss`.
    pub ntokens: usize,
    /// Summed sentence-pair count, the weight for `auc`.
    pub nsentences: usize,
}

impl ReducedMetrics {
    /// Emits the reduced scalars through structured logging, one event per
    /// scalar with its aggregation weight attached.
    pub fn log(&self) {
        tracing::info!(
            loss = %format!("{:.3}", self.loss),
            sample_size = self.sample_size,
            "similarity loss"
        );
        if let Some(nll_loss) = self.nll_loss {
            tracing::info!(
                nll_loss = %format!("{:.3}", nll_loss),
                ntokens = self.ntokens,
                "similarity nll loss"
            );
        }
        tracing::info!(
            auc = %format!("{:.4}", self.auc),
            nsentences = self.nsentences,
            "similarity AUC"
        );
    }
}
