//! Loss functions for pairwise similarity training.
//!
//! This crate provides the losses used when training a shared encoder to
//! score sentence pairs, built on the Burn deep learning framework. All
//! losses are backend-agnostic and follow Burn's standard loss layout:
//!
//! - Shape-preserving computation in `forward_no_reduction`
//! - Configurable reduction (Mean, Sum, Auto) in `forward`
//!
//! ## Provided losses
//!
//! - [`CosineEmbeddingLoss`]: margin-based loss over the cosine similarity
//!   of two embedding batches, for targets in `{+1, -1}`
//!
//! The row-wise [`cosine_similarity`] used by the loss is exported as well,
//! since the same scores double as ranking predictions at evaluation time.

mod cosine_embedding;
mod similarity;

pub use cosine_embedding::{CosineEmbeddingLoss, CosineEmbeddingLossConfig};
pub use similarity::cosine_similarity;
