//! The seam between the criterion and the host framework's model.

use burn::tensor::{Tensor, backend::Backend};

/// Capabilities the criterion requires from the host model.
///
/// The host owns the shared encoder and its named classification heads;
/// the criterion only needs to check that the configured head exists and
/// to run one input stream through the encoder plus that head.
pub trait SimilarityModel<B: Backend> {
    /// Whatever the shared encoder consumes for one sentence stream
    /// (token batches, precomputed features, ...).
    type NetInput;

    /// Whether a classification head with the given name is registered.
    fn has_classification_head(&self, name: &str) -> bool;

    /// Encodes one input stream and projects it through the named head.
    ///
    /// # Shapes
    ///
    /// - output: `[batch_size, embedding_dim]`
    fn forward_head(&self, input: &Self::NetInput, head_name: &str) -> Tensor<B, 2>;
}
