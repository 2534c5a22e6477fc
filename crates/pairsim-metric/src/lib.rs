//! Ranking-quality metrics for pairwise similarity training.
//!
//! Provides ROC curve construction and ROC-AUC scoring over plain `f64`
//! scores, plus [`AucMetric`], a Burn training metric that accumulates
//! similarity scores and `{+1, -1}` targets over an epoch and reports the
//! area under the ROC curve.
//!
//! The crate follows Burn's metric patterns:
//! - Generic over `Backend` for hardware portability
//! - Implements the `Metric` and `Numeric` traits
//! - Input structs carry prediction and target tensors per batch

pub mod auc;
pub mod input;
pub mod roc;

pub use auc::AucMetric;
pub use input::AucInput;
pub use roc::{MetricError, MetricResult, RocCurve, roc_auc_score, roc_curve};
