//! Row-wise cosine similarity between embedding batches.

use burn::tensor::{Tensor, backend::Backend};

/// Denominator floor, so zero embeddings compare as zero similarity
/// instead of dividing by zero.
const EPS: f64 = 1e-8;

/// Computes the cosine similarity between corresponding rows of two
/// embedding batches.
///
/// # Shapes
///
/// - input1: `[batch_size, embedding_dim]`
/// - input2: `[batch_size, embedding_dim]`
/// - output: `[batch_size]` with values in `[-1, 1]`
pub fn cosine_similarity<B: Backend>(
    input1: Tensor<B, 2>,
    input2: Tensor<B, 2>,
) -> Tensor<B, 1> {
    let dot = (input1.clone() * input2.clone()).sum_dim(1);
    let norm1 = input1.powi_scalar(2).sum_dim(1).sqrt();
    let norm2 = input2.powi_scalar(2).sum_dim(1).sqrt();
    let denom = (norm1 * norm2).clamp_min(EPS);

    (dot / denom).flatten::<1>(0, 1)
}

#[cfg(test)]
mod tests {
    use burn::tensor::{TensorData, Tolerance};

    use super::*;
    use crate::tests::TestBackend;

    #[test]
    fn identical_rows_have_similarity_one() {
        let device = Default::default();
        let a = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 2.0, 3.0], [0.0, 1.0, 0.0]]),
            &device,
        );

        let sim = cosine_similarity(a.clone(), a);

        let expected = TensorData::from([1.0, 1.0]);
        sim.into_data()
            .assert_approx_eq::<f32>(&expected, Tolerance::default());
    }

    #[test]
    fn orthogonal_and_opposite_rows() {
        let device = Default::default();
        let a = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[1.0, 0.0], [1.0, 0.0]]),
            &device,
        );
        let b = Tensor::<TestBackend, 2>::from_data(
            TensorData::from([[0.0, 1.0], [-1.0, 0.0]]),
            &device,
        );

        let sim = cosine_similarity(a, b);

        let expected = TensorData::from([0.0, -1.0]);
        sim.into_data()
            .assert_approx_eq::<f32>(&expected, Tolerance::default());
    }

    #[test]
    fn zero_vector_scores_zero_instead_of_nan() {
        let device = Default::default();
        let a = Tensor::<TestBackend, 2>::from_data(TensorData::from([[0.0, 0.0]]), &device);
        let b = Tensor::<TestBackend, 2>::from_data(TensorData::from([[1.0, 1.0]]), &device);

        let sim = cosine_similarity(a, b);

        let expected = TensorData::from([0.0]);
        sim.into_data()
            .assert_approx_eq::<f32>(&expected, Tolerance::default());
    }
}
