//! Everything the prediction view renders for one result.

use serde::Serialize;

use super::{Attributions, RiskTier, classify_risk, rank_attributions};
use crate::types::{ChurnLabel, PredictionResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub label: ChurnLabel,
    pub probability: f64,
    pub risk: RiskTier,
    pub attributions: Attributions,
}

impl PredictionSummary {
    /// e.g. `73.12%`
    pub fn probability_display(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

pub fn summarize_prediction(result: &PredictionResult) -> PredictionSummary {
    PredictionSummary {
        label: result.prediction,
        probability: result.probability,
        risk: classify_risk(result.probability),
        attributions: rank_attributions(&result.shap),
    }
}
