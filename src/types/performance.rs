//! Model evaluation types returned by `GET /model-performance`

use serde::{Deserialize, Serialize};

use crate::{ChurnLensError, Result};

/// One row of the model comparison table. All metrics are in [0,1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparisonRow {
    pub model: String,
    pub accuracy: f64,
    pub recall: f64,
    pub auc: f64,
}

/// 2×2 outcome counts for the deployed classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negative: u64,
    pub false_positive: u64,
    pub false_negative: u64,
    pub true_positive: u64,
}

impl ConfusionMatrix {
    pub fn new(
        true_negative: u64,
        false_positive: u64,
        false_negative: u64,
        true_positive: u64,
    ) -> Self {
        Self {
            true_negative,
            false_positive,
            false_negative,
            true_positive,
        }
    }

    /// Size of the evaluated population.
    ///
    /// Counts whose sum does not fit in a `u64` are a
    /// [`ChurnLensError::MalformedResponse`].
    pub fn total(&self) -> Result<u64> {
        [self.false_positive, self.false_negative, self.true_positive]
            .into_iter()
            .try_fold(self.true_negative, u64::checked_add)
            .ok_or_else(|| {
                ChurnLensError::MalformedResponse(
                    "confusion matrix counts overflow their total".into(),
                )
            })
    }
}

/// ROC curve as parallel, index-aligned rate arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    pub auc: f64,
}

/// Full model-performance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub model_comparison: Vec<ModelComparisonRow>,
    pub confusion_matrix: ConfusionMatrix,
    pub roc_curve: RocCurve,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_model: Option<String>,
    pub selection_reason: String,
}
