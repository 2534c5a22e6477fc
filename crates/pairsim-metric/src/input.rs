//! Input structures for similarity metrics.

use burn::{prelude::*, tensor::backend::Backend};
use derive_new::new;

/// AUC metric input.
#[derive(new, Debug, Clone)]
pub struct AucInput<B: Backend> {
    /// Similarity scores with shape `[batch_size]`.
    pub predictions: Tensor<B, 1>,
    /// Targets with shape `[batch_size]`, values `+1` or `-1`.
    pub targets: Tensor<B, 1, Int>,
}
