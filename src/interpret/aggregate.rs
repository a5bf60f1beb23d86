//! Chart-ready statistics derived from an [`AnalyticsSnapshot`].

use serde::Serialize;

use super::round_to;
use crate::types::{AnalyticsSnapshot, CategoryRates};
use crate::{ChurnLensError, Result};

/// One bar of a per-category churn chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentagePoint {
    pub name: String,
    /// Source fraction, untouched.
    pub rate: f64,
}

impl PercentagePoint {
    /// Unrounded percentage.
    pub fn percent(&self) -> f64 {
        self.rate * 100.0
    }

    /// Percentage rounded to one decimal place.
    pub fn rounded_percent(&self) -> f64 {
        round_to(self.percent(), 1)
    }

    /// e.g. `32.4%`
    pub fn display(&self) -> String {
        format!("{:.1}%", self.rounded_percent())
    }
}

/// Per-category percentages in the service's category order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PercentageSeries {
    points: Vec<PercentagePoint>,
}

impl PercentageSeries {
    pub fn from_rates(rates: &CategoryRates) -> Self {
        Self {
            points: rates
                .iter()
                .map(|(name, rate)| PercentagePoint {
                    name: name.clone(),
                    rate: *rate,
                })
                .collect(),
        }
    }

    pub fn points(&self) -> &[PercentagePoint] {
        &self.points
    }

    pub fn get(&self, name: &str) -> Option<&PercentagePoint> {
        self.points.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Category with the highest rounded percentage.
    ///
    /// Ties go to the earliest category in source order. `None` only for
    /// an empty series.
    pub fn extremal(&self) -> Option<&PercentagePoint> {
        self.points.iter().fold(None, |best, point| match best {
            Some(b) if point.rounded_percent() <= b.rounded_percent() => Some(b),
            _ => Some(point),
        })
    }
}

/// Everything the analytics view renders, derived in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    /// Overall churn rate × 100, rounded to two decimal places.
    pub overall_churn_percent: f64,
    pub geography: PercentageSeries,
    pub gender: PercentageSeries,
    /// Empty when the snapshot carries no activity breakdown.
    pub activity: PercentageSeries,
    pub churned_customers: usize,
    pub retained_customers: usize,
    pub total_customers: usize,
    /// Sample count of the balance distribution, when the service sent one.
    pub balance_samples: Option<usize>,
}

impl AggregateStats {
    /// e.g. `20.37%`
    pub fn overall_churn_display(&self) -> String {
        format!("{:.2}%", self.overall_churn_percent)
    }

    pub fn highest_churn_geography(&self) -> Option<&PercentagePoint> {
        self.geography.extremal()
    }

    pub fn highest_churn_gender(&self) -> Option<&PercentagePoint> {
        self.gender.extremal()
    }

    /// Fraction of analyzed customers who churned.
    pub fn churned_share(&self) -> Result<f64> {
        if self.total_customers == 0 {
            return Err(ChurnLensError::UndefinedRatio(
                "no customers in the age distribution".into(),
            ));
        }
        Ok(self.churned_customers as f64 / self.total_customers as f64)
    }
}

/// Derive all aggregate statistics from a snapshot.
pub fn derive_aggregate_stats(snapshot: &AnalyticsSnapshot) -> AggregateStats {
    let ages = &snapshot.age_distribution;
    AggregateStats {
        overall_churn_percent: round_to(snapshot.overall_churn_rate * 100.0, 2),
        geography: PercentageSeries::from_rates(&snapshot.churn_by_geography),
        gender: PercentageSeries::from_rates(&snapshot.churn_by_gender),
        activity: snapshot
            .churn_by_activity
            .as_ref()
            .map(PercentageSeries::from_rates)
            .unwrap_or_default(),
        churned_customers: ages.churned(),
        retained_customers: ages.retained(),
        total_customers: ages.total(),
        balance_samples: snapshot.balance_distribution.as_ref().map(|d| d.total()),
    }
}
