//! Batched sentence-pair samples.

use burn::{prelude::*, tensor::backend::Backend};
use derive_new::new;

/// One batch of sentence pairs for the similarity criterion.
///
/// The two input streams are encoded independently by the shared model;
/// `targets` marks each pair as similar (`+1`) or dissimilar (`-1`).
#[derive(new, Debug, Clone)]
pub struct SimilaritySample<B: Backend, I> {
    /// First sentence of each pair.
    pub net_input0: I,
    /// Second sentence of each pair.
    pub net_input1: I,
    /// Token count of the first stream, for per-token loss reporting.
    pub ntokens0: usize,
    /// Token count of the second stream.
    pub ntokens1: usize,
    /// Pair labels with shape `[batch_size]`, values `+1` or `-1`.
    pub targets: Tensor<B, 1, Int>,
}
