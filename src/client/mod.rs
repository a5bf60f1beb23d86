//! The churn service boundary.
//!
//! [`ChurnService`] is the seam between the orchestrator and the network:
//! [`HttpChurnClient`] talks to the real service, tests substitute their
//! own implementations.

mod http;

pub use http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpChurnClient};

use std::fmt;

use async_trait::async_trait;

use crate::Result;
use crate::types::{AnalyticsSnapshot, ModelPerformance, PredictionRequest, PredictionResult};

/// The three operations the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Predict,
    Analytics,
    ModelPerformance,
}

impl Operation {
    /// Metric/log label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Predict => "predict",
            Operation::Analytics => "analytics",
            Operation::ModelPerformance => "model_performance",
        }
    }

    /// Endpoint path relative to the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Operation::Predict => "predict",
            Operation::Analytics => "analytics",
            Operation::ModelPerformance => "model-performance",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote churn-prediction service.
///
/// Each method performs exactly one request and never retries.
#[async_trait]
pub trait ChurnService: Send + Sync {
    /// Score one customer profile.
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult>;

    /// Fetch the precomputed population analytics.
    async fn analytics(&self) -> Result<AnalyticsSnapshot>;

    /// Fetch the model comparison and evaluation data.
    async fn model_performance(&self) -> Result<ModelPerformance>;
}
