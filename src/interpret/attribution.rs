//! Ranking of signed SHAP contributions into risk-increasing and
//! risk-reducing groups.

use std::cmp::Ordering;

use serde::Serialize;

use crate::types::{FeatureKey, ShapContribution};

/// Which way a contribution pushes the churn probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    IncreasesRisk,
    ReducesRisk,
}

/// A contribution placed in its group, with its bar intensity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAttribution {
    pub feature: FeatureKey,
    pub impact: f64,
    pub direction: Direction,
    /// `min(|impact| × 100, 100)`, in [0,100]. Drives proportional bar width.
    pub intensity: f64,
}

impl RankedAttribution {
    fn new(contribution: &ShapContribution, direction: Direction) -> Self {
        Self {
            feature: contribution.feature.clone(),
            impact: contribution.impact,
            direction,
            intensity: (contribution.impact.abs() * 100.0).min(100.0),
        }
    }

    pub fn label(&self) -> &str {
        self.feature.label()
    }

    /// Signed impact in percentage points, e.g. `+12.3%` or `-4.0%`.
    pub fn impact_display(&self) -> String {
        match self.direction {
            Direction::IncreasesRisk => format!("+{:.1}%", self.impact * 100.0),
            Direction::ReducesRisk => format!("{:.1}%", self.impact * 100.0),
        }
    }
}

/// Contributions split by sign, each ordered by descending effect size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attributions {
    /// `impact > 0`, largest first.
    pub increasing: Vec<RankedAttribution>,
    /// `impact <= 0`, most negative first.
    pub reducing: Vec<RankedAttribution>,
}

impl Attributions {
    pub fn is_empty(&self) -> bool {
        self.increasing.is_empty() && self.reducing.is_empty()
    }

    pub fn len(&self) -> usize {
        self.increasing.len() + self.reducing.len()
    }
}

/// Partition and sort contributions.
///
/// Sorting is stable: equal impacts keep their input order.
pub fn rank_attributions(contributions: &[ShapContribution]) -> Attributions {
    let (mut increasing, mut reducing): (Vec<_>, Vec<_>) =
        contributions.iter().partition(|c| c.impact > 0.0);

    increasing.sort_by(|a, b| by_impact(b, a));
    reducing.sort_by(|a, b| by_impact(a, b));

    Attributions {
        increasing: increasing
            .into_iter()
            .map(|c| RankedAttribution::new(c, Direction::IncreasesRisk))
            .collect(),
        reducing: reducing
            .into_iter()
            .map(|c| RankedAttribution::new(c, Direction::ReducesRisk))
            .collect(),
    }
}

fn by_impact(a: &ShapContribution, b: &ShapContribution) -> Ordering {
    a.impact.partial_cmp(&b.impact).unwrap_or(Ordering::Equal)
}
