//! Public types for the churn service boundary.

mod analytics;
mod customer;
mod performance;
mod prediction;

pub use analytics::{AnalyticsSnapshot, CategoryRates, Distribution};
pub use customer::{CustomerForm, Gender, Geography, PredictionRequest};
pub use performance::{ConfusionMatrix, ModelComparisonRow, ModelPerformance, RocCurve};
pub use prediction::{ChurnLabel, FeatureKey, PredictionResult, ShapContribution};
