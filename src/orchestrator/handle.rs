//! Awaitable handle for one dispatched request.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::FutureExt;
use tokio::task::JoinHandle;

use super::{Completion, Outcome, RequestId, View};

/// Resolves once the request's outcome has been applied to its view
/// (or discarded because a newer request superseded it).
///
/// Dropping the handle does not cancel the request; the view is updated
/// either way.
#[derive(Debug)]
pub struct RequestHandle {
    view: View,
    request: RequestId,
    task: JoinHandle<Completion>,
}

impl RequestHandle {
    pub(crate) fn new(view: View, request: RequestId, task: JoinHandle<Completion>) -> Self {
        Self {
            view,
            request,
            task,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn request(&self) -> RequestId {
        self.request
    }
}

impl Future for RequestHandle {
    type Output = Completion;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let (view, request) = (self.view, self.request);
        self.task.poll_unpin(cx).map(|joined| match joined {
            Ok(completion) => completion,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            // Aborted because a newer request for the view took over.
            Err(_) => Completion {
                view,
                request,
                outcome: Outcome::Superseded,
            },
        })
    }
}
