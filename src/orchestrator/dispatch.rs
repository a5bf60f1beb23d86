//! The [`Orchestrator`]: turns commands into requests and requests into
//! view state.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use super::{
    Command, Completion, Dispatch, Outcome, RequestHandle, RequestId, View, ViewState,
};
use crate::cache::{CachedSnapshot, SnapshotCache};
use crate::client::ChurnService;
use crate::telemetry;
use crate::types::{
    AnalyticsSnapshot, CustomerForm, ModelPerformance, PredictionRequest, PredictionResult,
};
use crate::{ChurnLensError, Result};

/// Snapshot types a view can hold.
trait ViewSnapshot: Send + Sync + 'static {
    /// Cache representation; `None` for snapshots that are never cached.
    fn cache_entry(snapshot: &Arc<Self>) -> Option<CachedSnapshot>;
}

impl ViewSnapshot for PredictionResult {
    fn cache_entry(_: &Arc<Self>) -> Option<CachedSnapshot> {
        None
    }
}

impl ViewSnapshot for AnalyticsSnapshot {
    fn cache_entry(snapshot: &Arc<Self>) -> Option<CachedSnapshot> {
        Some(CachedSnapshot::Analytics(Arc::clone(snapshot)))
    }
}

impl ViewSnapshot for ModelPerformance {
    fn cache_entry(snapshot: &Arc<Self>) -> Option<CachedSnapshot> {
        Some(CachedSnapshot::ModelPerformance(Arc::clone(snapshot)))
    }
}

struct InFlight {
    request: RequestId,
    abort: AbortHandle,
}

/// One view's published state plus its single in-flight call.
struct ViewSlot<T> {
    state: watch::Sender<ViewState<T>>,
    in_flight: Mutex<Option<InFlight>>,
}

impl<T> ViewSlot<T> {
    fn new() -> Self {
        Self {
            state: watch::Sender::new(ViewState::Idle),
            in_flight: Mutex::new(None),
        }
    }

    fn in_flight(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pending(&self) -> Option<RequestId> {
        self.in_flight().as_ref().map(|f| f.request)
    }
}

type SlotOf<T> = fn(&Inner) -> &ViewSlot<T>;

struct Inner {
    service: Arc<dyn ChurnService>,
    cache: Arc<SnapshotCache>,
    next_request: AtomicU64,
    last_submitted: Mutex<Option<PredictionRequest>>,
    predict: ViewSlot<PredictionResult>,
    analytics: ViewSlot<AnalyticsSnapshot>,
    performance: ViewSlot<ModelPerformance>,
}

impl Inner {
    fn next_request_id(&self) -> RequestId {
        RequestId(self.next_request.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn last_submitted(&self) -> MutexGuard<'_, Option<PredictionRequest>> {
        self.last_submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a finished call to its view, unless a newer call took over.
    fn resolve<T: ViewSnapshot>(
        &self,
        view: View,
        request: RequestId,
        slot: SlotOf<T>,
        result: Result<T>,
    ) -> Completion {
        let slot = slot(self);
        let mut in_flight = slot.in_flight();
        if in_flight.as_ref().map(|f| f.request) != Some(request) {
            metrics::counter!(telemetry::STALE_RESPONSES_TOTAL, "view" => view.as_str())
                .increment(1);
            warn!(%view, %request, "discarding response for superseded request");
            return Completion {
                view,
                request,
                outcome: Outcome::Superseded,
            };
        }
        *in_flight = None;

        let outcome = match result {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                if let Some(entry) = T::cache_entry(&snapshot) {
                    self.cache.insert(view.operation(), entry);
                }
                slot.state.send_replace(ViewState::Loaded(snapshot));
                debug!(%view, %request, "view loaded");
                Outcome::Loaded
            }
            Err(err) => {
                if view.is_cached() {
                    self.cache
                        .insert(view.operation(), CachedSnapshot::Failed(err.clone()));
                }
                slot.state.send_replace(ViewState::Failed(err.clone()));
                debug!(%view, %request, error = %err, "view failed");
                Outcome::Failed(err)
            }
        };

        Completion {
            view,
            request,
            outcome,
        }
    }
}

/// Drives the three dashboard views against a [`ChurnService`].
///
/// Each view has its own state channel and at most one call in flight.
/// A newer call for a view aborts the older one; if the older response
/// still lands, it is discarded by request identity and never touches
/// the view. Views never share state, so a late response can only ever
/// affect the view that asked for it.
///
/// `dispatch` spawns onto the current tokio runtime and must be called
/// from within one.
///
/// ```rust,no_run
/// # use churnlens::{ChurnLens, Command, View};
/// # async fn run() -> churnlens::Result<()> {
/// let orchestrator = ChurnLens::builder().base_url("http://127.0.0.1:8000").build()?;
/// let mut analytics = orchestrator.subscribe_analytics();
/// if let Some(handle) = orchestrator.dispatch(Command::Activate(View::Analytics)).into_handle() {
///     handle.await;
/// }
/// println!("{:?}", analytics.borrow_and_update().is_pending());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

impl Orchestrator {
    /// Create an orchestrator with a private snapshot cache.
    pub fn new(service: Arc<dyn ChurnService>) -> Self {
        Self::with_cache(service, Arc::new(SnapshotCache::new()))
    }

    /// Create an orchestrator sharing a session-scoped snapshot cache.
    pub fn with_cache(service: Arc<dyn ChurnService>, cache: Arc<SnapshotCache>) -> Self {
        Self {
            inner: Arc::new(Inner {
                service,
                cache,
                next_request: AtomicU64::new(0),
                last_submitted: Mutex::new(None),
                predict: ViewSlot::new(),
                analytics: ViewSlot::new(),
                performance: ViewSlot::new(),
            }),
        }
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.inner.cache
    }

    /// Handle one user command.
    pub fn dispatch(&self, command: Command) -> Dispatch {
        debug!(?command, "dispatch");
        match command {
            Command::Activate(View::Predict) => Dispatch::Ignored,
            Command::Activate(view) => self.activate(view),
            Command::Retry(view) => self.retry(view),
            Command::Submit(form) => self.submit(&form),
        }
    }

    /// Request currently in flight for a view, if any.
    pub fn pending(&self, view: View) -> Option<RequestId> {
        match view {
            View::Predict => self.inner.predict.pending(),
            View::Analytics => self.inner.analytics.pending(),
            View::ModelPerformance => self.inner.performance.pending(),
        }
    }

    pub fn subscribe_predict(&self) -> watch::Receiver<ViewState<PredictionResult>> {
        self.inner.predict.state.subscribe()
    }

    pub fn subscribe_analytics(&self) -> watch::Receiver<ViewState<AnalyticsSnapshot>> {
        self.inner.analytics.state.subscribe()
    }

    pub fn subscribe_model_performance(&self) -> watch::Receiver<ViewState<ModelPerformance>> {
        self.inner.performance.state.subscribe()
    }

    pub fn predict_state(&self) -> ViewState<PredictionResult> {
        self.inner.predict.state.borrow().clone()
    }

    pub fn analytics_state(&self) -> ViewState<AnalyticsSnapshot> {
        self.inner.analytics.state.borrow().clone()
    }

    pub fn model_performance_state(&self) -> ViewState<ModelPerformance> {
        self.inner.performance.state.borrow().clone()
    }

    fn activate(&self, view: View) -> Dispatch {
        if let Some(request) = self.pending(view) {
            return Dispatch::AlreadyPending(request);
        }
        match (view, self.inner.cache.get(view.operation())) {
            (View::Analytics, Some(CachedSnapshot::Analytics(snapshot))) => {
                self.inner
                    .analytics
                    .state
                    .send_replace(ViewState::Loaded(snapshot));
                Dispatch::Cached
            }
            (View::ModelPerformance, Some(CachedSnapshot::ModelPerformance(snapshot))) => {
                self.inner
                    .performance
                    .state
                    .send_replace(ViewState::Loaded(snapshot));
                Dispatch::Cached
            }
            // Miss, or a cached failure: re-activation is the retry path.
            _ => self.fetch(view),
        }
    }

    fn retry(&self, view: View) -> Dispatch {
        if view.is_cached() {
            self.inner.cache.invalidate(view.operation());
            return self.fetch(view);
        }
        let last = self.inner.last_submitted().clone();
        match last {
            Some(request) => self.launch_predict(request),
            None => Dispatch::Ignored,
        }
    }

    fn submit(&self, form: &CustomerForm) -> Dispatch {
        match form.parse() {
            Ok(request) => {
                *self.inner.last_submitted() = Some(request.clone());
                self.launch_predict(request)
            }
            Err(err) => {
                self.reject_predict(err.clone());
                Dispatch::Rejected(err)
            }
        }
    }

    /// Publish a pre-flight failure, superseding any call in flight.
    fn reject_predict(&self, err: ChurnLensError) {
        let slot = &self.inner.predict;
        let mut in_flight = slot.in_flight();
        if let Some(previous) = in_flight.take() {
            previous.abort.abort();
        }
        warn!(error = %err, "prediction request rejected before sending");
        slot.state.send_replace(ViewState::Failed(err));
    }

    fn fetch(&self, view: View) -> Dispatch {
        let service = Arc::clone(&self.inner.service);
        match view {
            View::Analytics => self.launch(view, |inner| &inner.analytics, async move {
                service.analytics().await
            }),
            View::ModelPerformance => self.launch(view, |inner| &inner.performance, async move {
                service.model_performance().await
            }),
            View::Predict => Dispatch::Ignored,
        }
    }

    fn launch_predict(&self, request: PredictionRequest) -> Dispatch {
        let service = Arc::clone(&self.inner.service);
        self.launch(View::Predict, |inner| &inner.predict, async move {
            service.predict(&request).await
        })
    }

    /// Start one call for `view`, superseding any call already in flight.
    fn launch<T, Fut>(&self, view: View, slot: SlotOf<T>, call: Fut) -> Dispatch
    where
        T: ViewSnapshot,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let request = self.inner.next_request_id();
        let view_slot = slot(&self.inner);

        // Held until the abort handle is stored, so the task cannot resolve
        // against a slot that does not yet know about it.
        let mut in_flight = view_slot.in_flight();
        if let Some(previous) = in_flight.take() {
            debug!(%view, superseded = %previous.request, %request, "superseding in-flight request");
            previous.abort.abort();
        }
        view_slot.state.send_replace(ViewState::Pending(request));

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let result = call.await;
            inner.resolve(view, request, slot, result)
        });
        *in_flight = Some(InFlight {
            request,
            abort: task.abort_handle(),
        });
        drop(in_flight);

        debug!(%view, %request, "request started");
        Dispatch::Started(RequestHandle::new(view, request, task))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use metrics_util::MetricKind;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    use super::*;
    use crate::types::Distribution;
    use crate::client::Operation;

    struct Unreachable;

    #[async_trait]
    impl ChurnService for Unreachable {
        async fn predict(&self, _: &PredictionRequest) -> Result<PredictionResult> {
            Err(ChurnLensError::Network("unreachable".into()))
        }

        async fn analytics(&self) -> Result<AnalyticsSnapshot> {
            Err(ChurnLensError::Network("unreachable".into()))
        }

        async fn model_performance(&self) -> Result<ModelPerformance> {
            Err(ChurnLensError::Network("unreachable".into()))
        }
    }

    fn snapshot() -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            overall_churn_rate: 0.2,
            churn_by_geography: Default::default(),
            churn_by_gender: Default::default(),
            churn_by_activity: None,
            age_distribution: Distribution::default(),
            balance_distribution: None,
        }
    }

    /// Mark `request` as the analytics call in flight, backed by an idle task.
    fn mark_in_flight(orchestrator: &Orchestrator, request: RequestId) {
        let task = tokio::spawn(std::future::pending::<()>());
        let slot = &orchestrator.inner.analytics;
        *slot.in_flight() = Some(InFlight {
            request,
            abort: task.abort_handle(),
        });
        slot.state.send_replace(ViewState::Pending(request));
    }

    type SnapshotVec = Vec<(
        metrics_util::CompositeKey,
        Option<metrics::Unit>,
        Option<metrics::SharedString>,
        DebugValue,
    )>;

    fn stale_total(snapshot: &SnapshotVec) -> u64 {
        snapshot
            .iter()
            .filter(|(key, _, _, _)| {
                key.kind() == MetricKind::Counter
                    && key.key().name() == telemetry::STALE_RESPONSES_TOTAL
            })
            .map(|(_, _, _, value)| match value {
                DebugValue::Counter(v) => *v,
                _ => 0,
            })
            .sum()
    }

    #[tokio::test]
    async fn response_for_older_request_is_discarded() {
        let orchestrator = Orchestrator::new(Arc::new(Unreachable));
        mark_in_flight(&orchestrator, RequestId(2));

        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let completion = metrics::with_local_recorder(&recorder, || {
            orchestrator.inner.resolve(
                View::Analytics,
                RequestId(1),
                |inner| &inner.analytics,
                Ok(snapshot()),
            )
        });

        assert_eq!(completion.outcome, Outcome::Superseded);
        assert_eq!(completion.request, RequestId(1));
        assert_eq!(stale_total(&snapshotter.snapshot().into_vec()), 1);

        // The newer call still owns the view.
        assert_eq!(orchestrator.pending(View::Analytics), Some(RequestId(2)));
        assert!(matches!(
            orchestrator.analytics_state(),
            ViewState::Pending(RequestId(2))
        ));
        assert!(!orchestrator.cache().contains(Operation::Analytics));
    }

    #[tokio::test]
    async fn response_for_current_request_is_applied() {
        let orchestrator = Orchestrator::new(Arc::new(Unreachable));
        mark_in_flight(&orchestrator, RequestId(2));

        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let completion = metrics::with_local_recorder(&recorder, || {
            orchestrator.inner.resolve(
                View::Analytics,
                RequestId(2),
                |inner| &inner.analytics,
                Ok(snapshot()),
            )
        });

        assert_eq!(completion.outcome, Outcome::Loaded);
        assert_eq!(stale_total(&snapshotter.snapshot().into_vec()), 0);
        assert_eq!(orchestrator.pending(View::Analytics), None);
        assert!(orchestrator.analytics_state().loaded().is_some());
        assert!(orchestrator.cache().contains(Operation::Analytics));
    }
}
