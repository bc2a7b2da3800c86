use shared::{domain::JobId, protocol::SavedJob};
use tracing::info;

use super::{ScreenError, FETCH_SAVED_JOBS_FAILED, SAVE_JOB_FAILED, UNSAVE_JOB_FAILED};
use crate::{http::ApiClient, store::RequestSlice};

/// Saved jobs screen. Its state is local to the screen rather than part of
/// the store, but follows the same request lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedJobsScreen {
    pub saved: RequestSlice<SavedJob>,
}

impl SavedJobsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> impl Iterator<Item = &SavedJob> {
        self.saved.items.iter()
    }

    pub async fn load(&mut self, api: &ApiClient) -> Result<(), ScreenError> {
        self.saved.start();
        match api.saved_jobs().list().await {
            Ok(saved) => {
                self.saved.success(saved);
                Ok(())
            }
            Err(err) => {
                let err = ScreenError::from_client(&err, FETCH_SAVED_JOBS_FAILED);
                self.saved.failure(err.message.clone());
                Err(err)
            }
        }
    }

    /// Deletes the saved entry for `job` and drops it from the local list.
    /// Other entries are untouched.
    pub async fn unsave(&mut self, api: &ApiClient, job: JobId) -> Result<(), ScreenError> {
        let Some(saved_id) = self
            .saved
            .items
            .iter()
            .find(|s| s.job.id == job)
            .map(|s| s.id)
        else {
            let err = ScreenError::new(format!("Job {job} is not in your saved jobs"));
            self.saved.failure(err.message.clone());
            return Err(err);
        };

        match api.saved_jobs().unsave(saved_id).await {
            Ok(()) => {
                remove_job(&mut self.saved.items, job);
                info!(job_id = %job, "job unsaved");
                Ok(())
            }
            Err(err) => {
                let err = ScreenError::from_client(&err, UNSAVE_JOB_FAILED);
                self.saved.failure(err.message.clone());
                Err(err)
            }
        }
    }
}

/// Removes every saved entry pointing at `job`.
pub fn remove_job(saved: &mut Vec<SavedJob>, job: JobId) {
    saved.retain(|entry| entry.job.id != job);
}

/// Save toggle on the job details screen. Returns the new saved state.
pub async fn toggle_saved(
    api: &ApiClient,
    job: JobId,
    currently_saved: bool,
) -> Result<bool, ScreenError> {
    if currently_saved {
        let saved = api
            .saved_jobs()
            .list()
            .await
            .map_err(|err| ScreenError::from_client(&err, SAVE_JOB_FAILED))?;
        let entry = saved
            .iter()
            .find(|s| s.job.id == job)
            .ok_or_else(|| ScreenError::new(format!("Job {job} is not in your saved jobs")))?;
        api.saved_jobs()
            .unsave(entry.id)
            .await
            .map_err(|err| ScreenError::from_client(&err, SAVE_JOB_FAILED))?;
        Ok(false)
    } else {
        api.saved_jobs()
            .save(job)
            .await
            .map_err(|err| ScreenError::from_client(&err, SAVE_JOB_FAILED))?;
        Ok(true)
    }
}

/// Whether `job` appears in the caller's saved jobs.
pub async fn is_saved(api: &ApiClient, job: JobId) -> Result<bool, ScreenError> {
    let saved = api
        .saved_jobs()
        .list()
        .await
        .map_err(|err| ScreenError::from_client(&err, FETCH_SAVED_JOBS_FAILED))?;
    Ok(saved.iter().any(|s| s.job.id == job))
}
