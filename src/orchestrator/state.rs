//! Views, their observable state, and the commands that drive them.

use std::fmt;
use std::sync::Arc;

use crate::ChurnLensError;
use crate::client::Operation;
use crate::types::CustomerForm;

/// A dashboard view. Each owns exactly one result snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Predict,
    Analytics,
    ModelPerformance,
}

impl View {
    pub const ALL: [View; 3] = [View::Predict, View::Analytics, View::ModelPerformance];

    /// The service operation backing this view.
    pub fn operation(&self) -> Operation {
        match self {
            View::Predict => Operation::Predict,
            View::Analytics => Operation::Analytics,
            View::ModelPerformance => Operation::ModelPerformance,
        }
    }

    /// Whether resolutions for this view go through the snapshot cache.
    pub fn is_cached(&self) -> bool {
        !matches!(self, View::Predict)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Predict => "predict",
            View::Analytics => "analytics",
            View::ModelPerformance => "model_performance",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one outbound request; strictly increasing per orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub(crate) u64);

impl RequestId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a view currently shows.
///
/// Never partially filled: a view holds a complete snapshot, an explicit
/// failure, or nothing.
#[derive(Debug)]
pub enum ViewState<T> {
    /// Nothing requested yet.
    Idle,
    /// A call is in flight; no prior result is shown.
    Pending(RequestId),
    Loaded(Arc<T>),
    Failed(ChurnLensError),
}

// Manual impl: cloning shares the snapshot and must not require `T: Clone`.
impl<T> Clone for ViewState<T> {
    fn clone(&self) -> Self {
        match self {
            ViewState::Idle => ViewState::Idle,
            ViewState::Pending(id) => ViewState::Pending(*id),
            ViewState::Loaded(snapshot) => ViewState::Loaded(Arc::clone(snapshot)),
            ViewState::Failed(err) => ViewState::Failed(err.clone()),
        }
    }
}

impl<T> ViewState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, ViewState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ViewState::Pending(_))
    }

    pub fn loaded(&self) -> Option<&Arc<T>> {
        match self {
            ViewState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ChurnLensError> {
        match self {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// A user action, dispatched by the presentation layer.
#[derive(Debug, Clone)]
pub enum Command {
    /// The view became active.
    Activate(View),
    /// Drop the view's cached outcome and ask again.
    Retry(View),
    /// Submit the customer form for scoring.
    Submit(CustomerForm),
}

/// How the orchestrator handled a command.
#[derive(Debug)]
pub enum Dispatch {
    /// One request went out; await the handle for its completion.
    Started(super::RequestHandle),
    /// The view already has a call in flight; nothing was sent.
    AlreadyPending(RequestId),
    /// The view was served from the snapshot cache.
    Cached,
    /// Nothing to do (e.g. activating the predict view).
    Ignored,
    /// The command failed before any network call.
    Rejected(ChurnLensError),
}

impl Dispatch {
    /// The request handle, if a request was started.
    pub fn into_handle(self) -> Option<super::RequestHandle> {
        match self {
            Dispatch::Started(handle) => Some(handle),
            _ => None,
        }
    }
}

/// How a started request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The response was published to the view.
    Loaded,
    /// The failure was published to the view.
    Failed(ChurnLensError),
    /// A newer request for the same view took over; the view was not touched.
    Superseded,
}

/// Resolution of a [`RequestHandle`](super::RequestHandle).
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub view: View,
    pub request: RequestId,
    pub outcome: Outcome,
}
