//! Sentence-pair similarity criterion.
//!
//! A training criterion that scores pairs of sentences with a shared
//! encoder: both input streams are run through the model's named
//! classification head, a cosine embedding loss is computed over the
//! resulting logits, and per-batch statistics are collected into a
//! [`SimilarityLoggingOutput`]. Logging outputs from data-parallel workers
//! are later merged by [`SimilarityCriterion::reduce_metrics`], which turns
//! the summed loss into bits per sample and computes ROC-AUC over every
//! prediction gathered during the epoch.
//!
//! The criterion does not own a model, a training loop, or the transport
//! that moves logging outputs between workers; the host training framework
//! supplies all three. The only requirement on the host's model is the
//! small [`SimilarityModel`] seam.

pub mod criterion;
pub mod logging;
pub mod model;
pub mod sample;

pub use criterion::{SimilarityCriterion, SimilarityCriterionConfig};
pub use logging::{ReducedMetrics, SimilarityLoggingOutput};
pub use model::SimilarityModel;
pub use sample::SimilaritySample;
