//! ChurnLens - result-interpretation client for a churn-prediction service
//!
//! This crate talks to a remote churn-prediction service and turns its raw
//! responses into decision-ready artifacts: risk tiers, ranked feature
//! attributions, chart-ready percentages, confusion-matrix shares and ROC
//! series. An [`Orchestrator`] drives the three dashboard views, keeping at
//! most one request in flight per view and caching the two population-level
//! snapshots for the session.
//!
//! # Prediction Example
//!
//! ```rust,no_run
//! use churnlens::{ChurnService, CustomerForm, HttpChurnClient, summarize_prediction};
//!
//! #[tokio::main]
//! async fn main() -> churnlens::Result<()> {
//!     let client = HttpChurnClient::new("http://127.0.0.1:8000")?;
//!
//!     let request = CustomerForm::new()
//!         .geography("Germany")
//!         .age("42")
//!         .tenure("3")
//!         .balance("125000")
//!         .num_of_products("1")
//!         .credit_score("610")
//!         .estimated_salary("91000")
//!         .parse()?;
//!
//!     let summary = summarize_prediction(&client.predict(&request).await?);
//!     println!("{} ({})", summary.risk.label(), summary.probability_display());
//!     for driver in &summary.attributions.increasing {
//!         println!("  {} {}", driver.label(), driver.impact_display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Orchestrated Views Example
//!
//! ```rust,no_run
//! use churnlens::{ChurnLens, Command, View, ViewState, derive_aggregate_stats};
//!
//! #[tokio::main]
//! async fn main() -> churnlens::Result<()> {
//!     let orchestrator = ChurnLens::builder().build()?;
//!
//!     if let Some(handle) = orchestrator.dispatch(Command::Activate(View::Analytics)).into_handle() {
//!         handle.await;
//!     }
//!     if let ViewState::Loaded(snapshot) = orchestrator.analytics_state() {
//!         let stats = derive_aggregate_stats(&snapshot);
//!         println!("overall churn: {}", stats.overall_churn_display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod interpret;
pub mod orchestrator;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use cache::{CachedSnapshot, SnapshotCache};
pub use client::{ChurnService, HttpChurnClient, Operation};
pub use config::{ApiConfig, Config};
pub use error::{ChurnLensError, FailureKind, Result};
pub use orchestrator::{
    ChurnLens, ChurnLensBuilder, Command, Completion, Dispatch, Orchestrator, Outcome,
    RequestHandle, RequestId, View, ViewState,
};

// Re-export all types
pub use types::{
    AnalyticsSnapshot, CategoryRates, ChurnLabel, ConfusionMatrix, CustomerForm, Distribution,
    FeatureKey, Gender, Geography, ModelComparisonRow, ModelPerformance, PredictionRequest,
    PredictionResult, RocCurve, ShapContribution,
};

// Re-export interpretation artifacts
pub use interpret::{
    AggregateStats, Attributions, CellShare, ConfusionBreakdown, Direction, LeaderboardRow,
    Metric, ModelLeaderboard, PercentagePoint, PercentageSeries, PredictionSummary,
    RankedAttribution, RiskTier, RocPoint, RocSeries, adapt_roc, adapt_roc_curve,
    build_leaderboard, classify_risk, derive_aggregate_stats, derive_confusion,
    diagonal_baseline, rank_attributions, summarize_prediction,
};
