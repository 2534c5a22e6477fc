//! Cosine embedding loss for learning pairwise similarity.
//!
//! For a pair of embeddings with target `+1` (similar) or `-1` (dissimilar),
//! the per-example loss is:
//! ```text
//! target = +1: 1 - cos_sim
//! target = -1: max(0, cos_sim - margin)
//! ```

use burn::{
    config::Config,
    module::{Content, DisplaySettings, Module, ModuleDisplay},
    nn::loss::Reduction,
    tensor::{Int, Tensor, activation::relu, backend::Backend},
};

use crate::similarity::cosine_similarity;

/// Configuration for creating a [Cosine embedding loss](CosineEmbeddingLoss).
#[derive(Config, Debug)]
pub struct CosineEmbeddingLossConfig {
    /// Margin subtracted from the cosine similarity of negative pairs.
    /// Only similarities above the margin contribute loss. Default: 0.0
    #[config(default = 0.0)]
    pub margin: f64,
}

impl CosineEmbeddingLossConfig {
    /// Initialize [Cosine embedding loss](CosineEmbeddingLoss).
    pub fn init(&self) -> CosineEmbeddingLoss {
        self.assertions();
        CosineEmbeddingLoss {
            margin: self.margin,
        }
    }

    fn assertions(&self) {
        assert!(
            (-1.0..=1.0).contains(&self.margin),
            "Margin for CosineEmbeddingLoss must be in [-1, 1], got {}",
            self.margin
        );
    }
}

/// Cosine embedding loss.
///
/// Pulls similar pairs towards cosine similarity 1 and pushes dissimilar
/// pairs below the configured margin.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct CosineEmbeddingLoss {
    /// Margin applied to negative pairs.
    pub margin: f64,
}

impl Default for CosineEmbeddingLoss {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleDisplay for CosineEmbeddingLoss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content.add("margin", &self.margin).optional()
    }
}

impl CosineEmbeddingLoss {
    /// Create a new cosine embedding loss with default configuration.
    pub fn new() -> Self {
        CosineEmbeddingLossConfig::new().init()
    }

    /// Compute the criterion on the input tensors with reduction.
    ///
    /// # Shapes
    ///
    /// - input1: `[batch_size, embedding_dim]`
    /// - input2: `[batch_size, embedding_dim]`
    /// - target: `[batch_size]` with values `+1` or `-1`
    /// - output: `[1]`
    pub fn forward<B: Backend>(
        &self,
        input1: Tensor<B, 2>,
        input2: Tensor<B, 2>,
        target: Tensor<B, 1, Int>,
        reduction: Reduction,
    ) -> Tensor<B, 1> {
        let loss = self.forward_no_reduction(input1, input2, target);
        match reduction {
            Reduction::Mean | Reduction::Auto => loss.mean(),
            Reduction::Sum => loss.sum(),
        }
    }

    /// Compute the criterion on the input tensors without reduction.
    ///
    /// # Shapes
    ///
    /// - input1: `[batch_size, embedding_dim]`
    /// - input2: `[batch_size, embedding_dim]`
    /// - target: `[batch_size]` with values `+1` or `-1`
    /// - output: `[batch_size]`
    pub fn forward_no_reduction<B: Backend>(
        &self,
        input1: Tensor<B, 2>,
        input2: Tensor<B, 2>,
        target: Tensor<B, 1, Int>,
    ) -> Tensor<B, 1> {
        self.assertions(&input1, &input2, &target);

        let cos_sim = cosine_similarity(input1, input2);

        let pos_part = target
            .clone()
            .equal_elem(1)
            .float()
            .mul(Tensor::ones_like(&cos_sim) - cos_sim.clone());

        let neg_part = target
            .equal_elem(-1)
            .float()
            .mul(relu(cos_sim.sub_scalar(self.margin)));

        pos_part + neg_part
    }

    fn assertions<B: Backend>(
        &self,
        input1: &Tensor<B, 2>,
        input2: &Tensor<B, 2>,
        target: &Tensor<B, 1, Int>,
    ) {
        let [batch_size1, dim1] = input1.dims();
        let [batch_size2, dim2] = input2.dims();
        let [batch_size_target] = target.dims();

        assert_eq!(
            batch_size1, batch_size2,
            "Batch size of input1 ({batch_size1}) must match batch size of input2 ({batch_size2})"
        );

        assert_eq!(
            dim1, dim2,
            "Embedding dimension of input1 ({dim1}) must match embedding dimension of input2 ({dim2})"
        );

        assert_eq!(
            batch_size1, batch_size_target,
            "Batch size of inputs ({batch_size1}) must match batch size of target ({batch_size_target})"
        );
    }
}

#[cfg(test)]
mod tests {
    use burn::tensor::{TensorData, Tolerance};

    use super::*;
    use crate::tests::TestBackend;

    #[test]
    fn positive_targets_penalize_distance_from_similarity_one() {
        let device = Default::default();

        let input1 = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 0.0], [0.0, 1.0]]),
            &device,
        );
        let input2 = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 0.0], [1.0, 0.0]]),
            &device,
        );
        let target = Tensor::<TestBackend, 1, Int>::from_data(TensorData::from([1, 1]), &device);

        let loss = CosineEmbeddingLossConfig::new().init();
        let result = loss.forward_no_reduction(input1, input2, target);

        // First pair is identical (loss 0), second is orthogonal (loss 1).
        let expected = TensorData::from([0.0, 1.0]);
        result
            .into_data()
            .assert_approx_eq::<f32>(&expected, Tolerance::default());
    }

    #[test]
    fn negative_targets_penalize_similarity_above_margin() {
        let device = Default::default();

        let input1 = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 0.0], [0.0, 1.0]]),
            &device,
        );
        let input2 = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 0.0], [0.0, 1.0]]),
            &device,
        );
        let target = Tensor::<TestBackend, 1, Int>::from_data(TensorData::from([-1, -1]), &device);

        let loss = CosineEmbeddingLossConfig::new().init();
        let result = loss.forward_no_reduction(input1.clone(), input2.clone(), target.clone());

        // With margin 0.0, identical negative pairs cost max(0, 1 - 0) = 1.
        let expected = TensorData::from([1.0, 1.0]);
        result
            .into_data()
            .assert_approx_eq::<f32>(&expected, Tolerance::default());

        // With margin 0.5, the same pairs cost max(0, 1 - 0.5) = 0.5.
        let loss_with_margin = CosineEmbeddingLossConfig::new().with_margin(0.5).init();
        let result = loss_with_margin.forward(input1, input2, target, Reduction::Mean);

        let expected = TensorData::from([0.5]);
        result
            .into_data()
            .assert_approx_eq::<f32>(&expected, Tolerance::default());
    }

    #[test]
    fn mixed_targets_select_the_matching_branch() {
        let device = Default::default();

        let input1 = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 0.0], [0.0, 1.0]]),
            &device,
        );
        let input2 = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 0.0], [0.0, 1.0]]),
            &device,
        );
        let target = Tensor::<TestBackend, 1, Int>::from_data(TensorData::from([1, -1]), &device);

        let loss = CosineEmbeddingLossConfig::new().init();
        let result = loss.forward_no_reduction(input1, input2, target);

        let expected = TensorData::from([0.0, 1.0]);
        result
            .into_data()
            .assert_approx_eq::<f32>(&expected, Tolerance::default());
    }

    #[test]
    fn sum_reduction_adds_per_example_losses() {
        let device = Default::default();

        let input1 = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 0.0], [0.0, 1.0]]),
            &device,
        );
        let input2 = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 0.0], [0.0, 1.0]]),
            &device,
        );
        let target = Tensor::<TestBackend, 1, Int>::from_data(TensorData::from([-1, -1]), &device);

        let loss = CosineEmbeddingLossConfig::new().init();
        let sum = loss.forward(input1.clone(), input2.clone(), target.clone(), Reduction::Sum);
        let mean = loss.forward(input1, input2, target, Reduction::Mean);

        sum.into_data()
            .assert_approx_eq::<f32>(&TensorData::from([2.0]), Tolerance::default());
        mean.into_data()
            .assert_approx_eq::<f32>(&TensorData::from([1.0]), Tolerance::default());
    }

    #[test]
    #[should_panic = "Batch size of inputs (2) must match batch size of target (3)"]
    fn mismatched_target_batch_panics() {
        let device = Default::default();

        let input1 = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 0.0], [0.0, 1.0]]),
            &device,
        );
        let input2 = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 0.0], [0.0, 1.0]]),
            &device,
        );
        let target =
            Tensor::<TestBackend, 1, Int>::from_data(TensorData::from([1, -1, 1]), &device);

        let loss = CosineEmbeddingLoss::new();
        let _result = loss.forward_no_reduction(input1, input2, target);
    }

    #[test]
    #[should_panic = "Margin for CosineEmbeddingLoss must be in [-1, 1]"]
    fn out_of_range_margin_panics() {
        let _loss = CosineEmbeddingLossConfig::new().with_margin(2.0).init();
    }

    #[test]
    fn display_shows_margin() {
        let loss = CosineEmbeddingLossConfig::new().with_margin(0.5).init();

        let display_str = format!("{loss}");
        assert!(display_str.contains("CosineEmbeddingLoss"));
        assert!(display_str.contains("margin: 0.5"));
    }
}
