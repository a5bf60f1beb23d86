//! Three-tier risk classification of a churn probability.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Probabilities at or above this are [`RiskTier::High`].
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Probabilities at or above this (and below [`HIGH_RISK_THRESHOLD`]) are
/// [`RiskTier::Medium`].
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// Coarse risk bucket for a churn probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<f64> for RiskTier {
    fn from(probability: f64) -> Self {
        classify_risk(probability)
    }
}

/// Map a churn probability to its risk tier.
///
/// Out-of-range input goes through the same thresholds unchanged.
pub fn classify_risk(probability: f64) -> RiskTier {
    if probability >= HIGH_RISK_THRESHOLD {
        RiskTier::High
    } else if probability >= MEDIUM_RISK_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}
