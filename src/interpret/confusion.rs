//! Percentage breakdown of a 2×2 confusion matrix.

use serde::Serialize;

use super::round_to;
use crate::types::ConfusionMatrix;
use crate::{ChurnLensError, Result};

/// One cell's count and its share of the evaluated population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellShare {
    pub count: u64,
    /// Unrounded `count / total × 100`.
    pub percent: f64,
}

impl CellShare {
    fn of(count: u64, total: u64) -> Self {
        Self {
            count,
            percent: count as f64 * 100.0 / total as f64,
        }
    }

    pub fn rounded_percent(&self) -> f64 {
        round_to(self.percent, 1)
    }

    /// e.g. `76.5%`
    pub fn display(&self) -> String {
        format!("{:.1}%", self.rounded_percent())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfusionBreakdown {
    pub total: u64,
    pub true_negative: CellShare,
    pub false_positive: CellShare,
    pub false_negative: CellShare,
    pub true_positive: CellShare,
}

/// Convert the four counts into population shares.
///
/// Fails with [`ChurnLensError::UndefinedRatio`] when every count is zero,
/// and with [`ChurnLensError::MalformedResponse`] when the counts overflow.
pub fn derive_confusion(matrix: &ConfusionMatrix) -> Result<ConfusionBreakdown> {
    let total = matrix.total()?;
    if total == 0 {
        return Err(ChurnLensError::UndefinedRatio(
            "confusion matrix has no evaluated samples".into(),
        ));
    }
    Ok(ConfusionBreakdown {
        total,
        true_negative: CellShare::of(matrix.true_negative, total),
        false_positive: CellShare::of(matrix.false_positive, total),
        false_negative: CellShare::of(matrix.false_negative, total),
        true_positive: CellShare::of(matrix.true_positive, total),
    })
}
