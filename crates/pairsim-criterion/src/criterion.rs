//! The similarity criterion: forward pass and cross-worker reduction.

use std::f64::consts::LN_2;

use burn::{
    config::Config,
    nn::loss::Reduction,
    tensor::{Tensor, backend::Backend, cast::ToElement},
};
use pairsim_loss::{CosineEmbeddingLoss, CosineEmbeddingLossConfig, cosine_similarity};
use pairsim_metric::roc_auc_score;

use crate::{
    logging::{ReducedMetrics, SimilarityLoggingOutput},
    model::SimilarityModel,
    sample::SimilaritySample,
};

/// Configuration for creating a [Similarity criterion](SimilarityCriterion).
#[derive(Config, Debug)]
pub struct SimilarityCriterionConfig {
    /// Name of the classification head the host model must provide.
    pub classification_head_name: String,

    /// Margin for the cosine embedding loss; also the decision threshold
    /// for the correctness counts. Default: 0.0
    #[config(default = 0.0)]
    pub margin: f64,
}

impl SimilarityCriterionConfig {
    /// Initialize [Similarity criterion](SimilarityCriterion).
    pub fn init(&self) -> SimilarityCriterion {
        SimilarityCriterion {
            classification_head_name: self.classification_head_name.clone(),
            loss: CosineEmbeddingLossConfig::new()
                .with_margin(self.margin)
                .init(),
        }
    }
}

/// Pairwise sentence similarity criterion.
///
/// Encodes both streams of a [`SimilaritySample`] through the host model's
/// classification head, computes a sum-reduced cosine embedding loss, and
/// collects the statistics later merged by [`reduce_metrics`](Self::reduce_metrics).
#[derive(Debug, Clone)]
pub struct SimilarityCriterion {
    /// Head the shared encoder's outputs are projected through.
    pub classification_head_name: String,
    /// The loss applied to the two logit batches.
    pub loss: CosineEmbeddingLoss,
}

impl SimilarityCriterion {
    /// Create a criterion using the conventional `"similarity"` head.
    pub fn new() -> Self {
        SimilarityCriterionConfig::new("similarity".to_owned()).init()
    }

    /// Compute the loss for the given sample.
    ///
    /// Returns a tuple with three elements:
    /// 1. the sum-reduced loss
    /// 2. the sample size, used as the denominator for the gradient
    /// 3. logging statistics for later reduction
    pub fn forward<B: Backend, M: SimilarityModel<B>>(
        &self,
        model: &M,
        sample: &SimilaritySample<B, M::NetInput>,
    ) -> (Tensor<B, 1>, usize, SimilarityLoggingOutput) {
        assert!(
            model.has_classification_head(&self.classification_head_name),
            "model must provide the '{}' classification head for the similarity criterion",
            self.classification_head_name
        );

        let logits0 = model.forward_head(&sample.net_input0, &self.classification_head_name);
        let logits1 = model.forward_head(&sample.net_input1, &self.classification_head_name);

        let targets = sample.targets.clone();
        let [sample_size] = targets.dims();

        let loss = self.loss.forward(
            logits0.clone(),
            logits1.clone(),
            targets.clone(),
            Reduction::Sum,
        );

        let preds: Vec<f64> = cosine_similarity(logits0, logits1)
            .into_data()
            .iter::<f64>()
            .collect();
        let target_values: Vec<f64> = targets.float().into_data().iter::<f64>().collect();

        // The margin doubles as the decision threshold for the counts; the
        // targets are +-1, so `target > margin` picks the positive pairs
        // for any margin in [-1, 1).
        let margin = self.loss.margin;
        let mut ncorrect = 0;
        let mut ncorrect_total = 0;
        let mut ncorrect_pred = 0;
        let mut ncorrect_actual = 0;
        for (&pred, &target) in preds.iter().zip(&target_values) {
            let predicted_positive = pred > margin;
            let actual_positive = target > margin;
            if predicted_positive == actual_positive {
                ncorrect_total += 1;
                if actual_positive {
                    ncorrect += 1;
                }
            }
            if predicted_positive {
                ncorrect_pred += 1;
            }
            if actual_positive {
                ncorrect_actual += 1;
            }
        }

        let logging_output = SimilarityLoggingOutput {
            loss: loss.clone().into_scalar().to_f64(),
            ntokens: sample.ntokens0 + sample.ntokens1,
            nsentences: sample_size,
            sample_size,
            ncorrect,
            ncorrect_total,
            ncorrect_pred,
            ncorrect_actual,
            preds,
            targets: target_values,
        };

        (loss, sample_size, logging_output)
    }

    /// Aggregate logging outputs from data-parallel training.
    ///
    /// Scalars sum across workers; predictions and targets concatenate.
    /// The loss is reported in bits per sample, with an additional
    /// per-token value when the token count differs from the sample count.
    /// A gathered target set without exactly two distinct values has no
    /// defined ranking and reports an AUC of 1.0.
    pub fn reduce_metrics(logging_outputs: &[SimilarityLoggingOutput]) -> ReducedMetrics {
        assert!(
            !logging_outputs.is_empty(),
            "cannot reduce an empty set of logging outputs"
        );

        let loss_sum: f64 = logging_outputs.iter().map(|log| log.loss).sum();
        let ntokens: usize = logging_outputs.iter().map(|log| log.ntokens).sum();
        let nsentences: usize = logging_outputs.iter().map(|log| log.nsentences).sum();
        let sample_size: usize = logging_outputs.iter().map(|log| log.sample_size).sum();

        let loss = loss_sum / sample_size as f64 / LN_2;
        let nll_loss = (sample_size != ntokens).then(|| loss_sum / ntokens as f64 / LN_2);

        let preds: Vec<f64> = logging_outputs
            .iter()
            .flat_map(|log| log.preds.iter().copied())
            .collect();
        let targets: Vec<f64> = logging_outputs
            .iter()
            .flat_map(|log| log.targets.iter().copied())
            .collect();

        let auc = if distinct_values(&targets) == 2 {
            roc_auc_score(&targets, &preds).unwrap_or(1.0)
        } else {
            1.0
        };

        ReducedMetrics {
            loss,
            nll_loss,
            auc,
            sample_size,
            ntokens,
            nsentences,
        }
    }

    /// Whether logging outputs can be summed element-wise across workers
    /// before reduction. They cannot: the per-example prediction and
    /// target vectors must be concatenated, not added.
    pub const fn logging_outputs_can_be_summed() -> bool {
        false
    }
}

impl Default for SimilarityCriterion {
    fn default() -> Self {
        Self::new()
    }
}

fn distinct_values(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}
