//! Result interpretation: pure transforms from raw service responses to
//! decision-ready artifacts.
//!
//! Every function here is side-effect free and deterministic, so deriving
//! twice from the same snapshot yields identical output. Rounding only
//! ever affects the rendered figure; source fractions are kept intact.

mod aggregate;
mod attribution;
mod confusion;
mod leaderboard;
mod risk;
mod roc;
mod summary;

pub use aggregate::{AggregateStats, PercentagePoint, PercentageSeries, derive_aggregate_stats};
pub use attribution::{Attributions, Direction, RankedAttribution, rank_attributions};
pub use confusion::{CellShare, ConfusionBreakdown, derive_confusion};
pub use leaderboard::{LeaderboardRow, Metric, ModelLeaderboard, build_leaderboard};
pub use risk::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD, RiskTier, classify_risk};
pub use roc::{RocPoint, RocSeries, adapt_roc, adapt_roc_curve, diagonal_baseline};
pub use summary::{PredictionSummary, summarize_prediction};

/// Round half away from zero to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
