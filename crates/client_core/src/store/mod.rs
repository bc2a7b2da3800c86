//! Client-side state: the jobs and applications slices and the handle that
//! owns them. Transitions go through [`Store::dispatch`] only.

pub mod applications;
pub mod jobs;
pub mod slice;

use std::sync::Arc;

use shared::protocol::{JobFilters, JobFiltersPatch};
use tokio::sync::RwLock;

pub use applications::{ApplicationsAction, ApplicationsState};
pub use jobs::{JobsAction, JobsState};
pub use slice::{RequestSeq, RequestSlice, RequestStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub jobs: JobsState,
    pub applications: ApplicationsState,
}

#[derive(Debug, Clone)]
pub enum AppAction {
    Jobs(JobsAction),
    Applications(ApplicationsAction),
}

impl From<JobsAction> for AppAction {
    fn from(value: JobsAction) -> Self {
        AppAction::Jobs(value)
    }
}

impl From<ApplicationsAction> for AppAction {
    fn from(value: ApplicationsAction) -> Self {
        AppAction::Applications(value)
    }
}

pub fn reduce(state: &mut AppState, action: AppAction) {
    match action {
        AppAction::Jobs(action) => jobs::reduce(&mut state.jobs, action),
        AppAction::Applications(action) => applications::reduce(&mut state.applications, action),
    }
}

/// Shared handle to the application state. Clones point at the same state.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<AppState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    pub async fn dispatch(&self, action: impl Into<AppAction>) {
        let mut guard = self.inner.write().await;
        reduce(&mut guard, action.into());
    }

    /// Dispatches the jobs start transition and returns its sequence number.
    pub async fn begin_jobs_request(&self) -> RequestSeq {
        let mut guard = self.inner.write().await;
        jobs::reduce(&mut guard.jobs, JobsAction::FetchStart);
        guard.jobs.list.latest_seq()
    }

    /// Merges `patch` into the jobs filters and starts a jobs request under a
    /// single write guard. The returned filters are the ones the request with
    /// the returned sequence number must use.
    pub async fn begin_jobs_fetch(&self, patch: Option<JobFiltersPatch>) -> (RequestSeq, JobFilters) {
        let mut guard = self.inner.write().await;
        if let Some(patch) = patch {
            jobs::reduce(&mut guard.jobs, JobsAction::SetFilters(patch));
        }
        jobs::reduce(&mut guard.jobs, JobsAction::FetchStart);
        (guard.jobs.list.latest_seq(), guard.jobs.filters.clone())
    }

    pub async fn begin_applications_request(&self) -> RequestSeq {
        let mut guard = self.inner.write().await;
        applications::reduce(&mut guard.applications, ApplicationsAction::FetchStart);
        guard.applications.list.latest_seq()
    }

    pub async fn snapshot(&self) -> AppState {
        self.inner.read().await.clone()
    }

    pub async fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard)
    }
}

#[cfg(test)]
#[path = "../tests/store_tests.rs"]
mod tests;
