//! AUC metric implementation for similarity training.
//!
//! Accumulates similarity scores and targets over an epoch and reports the
//! area under the ROC curve, the way an epoch-level evaluation would
//! compute it over the full validation set rather than averaging per-batch
//! values.

use core::marker::PhantomData;

use burn::{
    tensor::backend::Backend,
    train::metric::{Metric, MetricEntry, MetricMetadata, Numeric},
};

use super::input::AucInput;
use crate::roc::{MetricError, roc_auc_score};

// --- AUC Metric ---

/// Area under the ROC curve, accumulated over an epoch.
///
/// An accumulation containing only one class reports `1.0`, matching the
/// criterion's convention for degenerate target sets.
#[derive(Default)]
pub struct AucMetric<B: Backend> {
    scores: Vec<f64>,
    targets: Vec<f64>,
    current: f64,
    _b: PhantomData<B>,
}

impl<B: Backend> AucMetric<B> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: Backend> Metric for AucMetric<B> {
    type Input = AucInput<B>;

    fn name(&self) -> String {
        "AUC".to_owned()
    }

    fn update(&mut self, item: &Self::Input, _metadata: &MetricMetadata) -> MetricEntry {
        self.scores
            .extend(item.predictions.clone().into_data().iter::<f64>());
        self.targets
            .extend(item.targets.clone().float().into_data().iter::<f64>());

        self.current = match roc_auc_score(&self.targets, &self.scores) {
            Ok(auc) => auc,
            Err(MetricError::SingleClass) => 1.0,
            Err(_) => 0.0,
        };

        MetricEntry::new(
            self.name(),
            format!("AUC: {:.4}", self.current),
            self.current.to_string(),
        )
    }

    fn clear(&mut self) {
        self.scores.clear();
        self.targets.clear();
        self.current = 0.0;
    }
}

impl<B: Backend> Numeric for AucMetric<B> {
    fn value(&self) -> f64 {
        self.current
    }
}
