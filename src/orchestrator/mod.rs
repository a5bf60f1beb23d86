//! Request orchestration: one command in, one request out, state published
//! per view.

mod builder;
mod dispatch;
mod handle;
mod state;

pub use builder::{ChurnLens, ChurnLensBuilder};
pub use dispatch::Orchestrator;
pub use handle::RequestHandle;
pub use state::{Command, Completion, Dispatch, Outcome, RequestId, View, ViewState};
