//! Aggregate analytics snapshot returned by `GET /analytics`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Category name → churn rate (fraction in [0,1]).
///
/// Insertion order of the service's JSON object is preserved; it is the
/// tie-break order for extremal-category selection.
pub type CategoryRates = IndexMap<String, f64>;

/// Per-outcome samples of one customer attribute.
///
/// Only the lengths are used for counting; the values feed histograms
/// on the presentation side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub churn: Vec<f64>,
    pub not_churn: Vec<f64>,
}

impl Distribution {
    pub fn churned(&self) -> usize {
        self.churn.len()
    }

    pub fn retained(&self) -> usize {
        self.not_churn.len()
    }

    pub fn total(&self) -> usize {
        self.churned() + self.retained()
    }
}

/// Precomputed analytics over the customer population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub overall_churn_rate: f64,
    pub churn_by_geography: CategoryRates,
    pub churn_by_gender: CategoryRates,
    /// Absent in some service versions; absence means "no activity breakdown".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub churn_by_activity: Option<CategoryRates>,
    pub age_distribution: Distribution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_distribution: Option<Distribution>,
}
