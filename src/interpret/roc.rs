//! ROC curve point sequence plus the random-classifier baseline.

use serde::Serialize;

use crate::types::RocCurve;
use crate::{ChurnLensError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
}

impl RocPoint {
    pub const fn new(fpr: f64, tpr: f64) -> Self {
        Self { fpr, tpr }
    }
}

const DIAGONAL: [RocPoint; 2] = [RocPoint::new(0.0, 0.0), RocPoint::new(1.0, 1.0)];

/// The `(0,0) → (1,1)` reference line. Independent of any curve.
pub fn diagonal_baseline() -> [RocPoint; 2] {
    DIAGONAL
}

/// Zip index-aligned rate arrays into points.
///
/// Arrays of different length are a [`ChurnLensError::MalformedResponse`];
/// nothing is truncated.
pub fn adapt_roc(fpr: &[f64], tpr: &[f64]) -> Result<Vec<RocPoint>> {
    if fpr.len() != tpr.len() {
        return Err(ChurnLensError::MalformedResponse(format!(
            "ROC arrays differ in length: fpr has {}, tpr has {}",
            fpr.len(),
            tpr.len()
        )));
    }
    Ok(fpr
        .iter()
        .zip(tpr)
        .map(|(&fpr, &tpr)| RocPoint { fpr, tpr })
        .collect())
}

/// Chart-ready ROC data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocSeries {
    pub points: Vec<RocPoint>,
    pub baseline: [RocPoint; 2],
    pub auc: f64,
}

impl RocSeries {
    /// e.g. `AUC = 0.873`
    pub fn auc_display(&self) -> String {
        format!("AUC = {:.3}", self.auc)
    }
}

pub fn adapt_roc_curve(curve: &RocCurve) -> Result<RocSeries> {
    Ok(RocSeries {
        points: adapt_roc(&curve.fpr, &curve.tpr)?,
        baseline: diagonal_baseline(),
        auc: curve.auc,
    })
}
