//! Model comparison table with display formatting and best-model lookup.

use serde::Serialize;

use crate::types::{ModelComparisonRow, ModelPerformance};

/// Comparison metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Accuracy,
    Recall,
    Auc,
}

impl Metric {
    pub fn of(&self, row: &ModelComparisonRow) -> f64 {
        match self {
            Metric::Accuracy => row.accuracy,
            Metric::Recall => row.recall,
            Metric::Auc => row.auc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    #[serde(flatten)]
    pub row: ModelComparisonRow,
    /// Whether the service reports this as the deployed model.
    pub selected: bool,
}

impl LeaderboardRow {
    /// e.g. `87.0%`
    pub fn accuracy_display(&self) -> String {
        format!("{:.1}%", self.row.accuracy * 100.0)
    }

    /// e.g. `51.3%`
    pub fn recall_display(&self) -> String {
        format!("{:.1}%", self.row.recall * 100.0)
    }

    /// e.g. `0.873`
    pub fn auc_display(&self) -> String {
        format!("{:.3}", self.row.auc)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelLeaderboard {
    pub rows: Vec<LeaderboardRow>,
    pub selection_reason: String,
}

impl ModelLeaderboard {
    /// Row with the highest value of `metric`; the first row wins ties.
    pub fn best_by(&self, metric: Metric) -> Option<&LeaderboardRow> {
        self.rows.iter().fold(None, |best, candidate| match best {
            Some(b) if metric.of(&candidate.row) <= metric.of(&b.row) => Some(b),
            _ => Some(candidate),
        })
    }

    pub fn selected(&self) -> Option<&LeaderboardRow> {
        self.rows.iter().find(|r| r.selected)
    }
}

/// Build the comparison table in service order.
pub fn build_leaderboard(performance: &ModelPerformance) -> ModelLeaderboard {
    let selected = performance.selected_model.as_deref();
    ModelLeaderboard {
        rows: performance
            .model_comparison
            .iter()
            .map(|row| LeaderboardRow {
                row: row.clone(),
                selected: selected == Some(row.model.as_str()),
            })
            .collect(),
        selection_reason: performance.selection_reason.clone(),
    }
}
