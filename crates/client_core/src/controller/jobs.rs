use shared::{
    domain::JobId,
    protocol::{Job, JobFiltersPatch, JobSearch, Resume},
};
use tracing::info;

use super::{ScreenError, FETCH_JOBS_FAILED, FETCH_JOB_DETAILS_FAILED};
use crate::{
    http::ApiClient,
    store::{JobsAction, Store},
};

/// Job list screen. Merges `filters` (when given) into the slice, then
/// fetches with the resulting filters.
pub async fn fetch_jobs(
    api: &ApiClient,
    store: &Store,
    filters: Option<JobFiltersPatch>,
) -> Result<(), ScreenError> {
    let (seq, filters) = store.begin_jobs_fetch(filters).await;
    match api.jobs().list(&filters).await {
        Ok(jobs) => {
            info!(count = jobs.len(), "jobs fetched");
            store
                .dispatch(JobsAction::FetchSuccessFor { seq, jobs })
                .await;
            Ok(())
        }
        Err(err) => {
            let err = ScreenError::from_client(&err, FETCH_JOBS_FAILED);
            store
                .dispatch(JobsAction::FetchFailureFor {
                    seq,
                    message: err.message.clone(),
                })
                .await;
            Err(err)
        }
    }
}

/// Same lifecycle as [`fetch_jobs`] but through the search endpoint, which
/// also matches on title and salary bounds.
pub async fn search_jobs(
    api: &ApiClient,
    store: &Store,
    search: &JobSearch,
) -> Result<(), ScreenError> {
    let seq = store.begin_jobs_request().await;
    match api.jobs().search(search).await {
        Ok(jobs) => {
            store
                .dispatch(JobsAction::FetchSuccessFor { seq, jobs })
                .await;
            Ok(())
        }
        Err(err) => {
            let err = ScreenError::from_client(&err, FETCH_JOBS_FAILED);
            store
                .dispatch(JobsAction::FetchFailureFor {
                    seq,
                    message: err.message.clone(),
                })
                .await;
            Err(err)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobDetails {
    pub job: Job,
    pub resumes: Vec<Resume>,
}

/// Job details screen: the job and the caller's resumes (for the apply
/// form), fetched together. The job becomes the slice's selection.
pub async fn load_job_details(
    api: &ApiClient,
    store: &Store,
    id: JobId,
) -> Result<JobDetails, ScreenError> {
    let jobs = api.jobs();
    let resumes = api.resumes();
    let (job, resumes) = tokio::try_join!(jobs.retrieve(id), resumes.list())
        .map_err(|err| ScreenError::from_client(&err, FETCH_JOB_DETAILS_FAILED))?;

    store.dispatch(JobsAction::SetSelected(job.clone())).await;
    Ok(JobDetails { job, resumes })
}
