//! Telemetry metric name constants.
//!
//! Centralised metric names for churnlens operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `churnlens_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation`: service operation: "predict", "analytics" or "model_performance"
//! - `status`: outcome: "ok" or "error"
//! - `view`: dashboard view the response was addressed to

/// Total requests sent to the churn service.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "churnlens_requests_total";

/// Request duration in seconds.
///
/// Labels: `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "churnlens_request_duration_seconds";

/// Responses that arrived after their request was superseded.
///
/// Labels: `view`.
pub const STALE_RESPONSES_TOTAL: &str = "churnlens_stale_responses_total";

/// Snapshot cache hits on view activation.
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "churnlens_cache_hits_total";

/// Snapshot cache misses on view activation.
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "churnlens_cache_misses_total";
