use shared::{
    domain::{ApplicationId, ApplicationStatus, JobId, ResumeId},
    protocol::{JobApplication, NewApplication},
};
use tracing::info;

use super::{
    Navigation, ScreenError, FETCH_APPLICATIONS_FAILED, FETCH_APPLICATION_FAILED,
    SELECT_RESUME, SUBMIT_APPLICATION_FAILED, UPDATE_APPLICATION_FAILED,
};
use crate::{
    http::ApiClient,
    store::{ApplicationsAction, Store},
};

pub async fn fetch_applications(api: &ApiClient, store: &Store) -> Result<(), ScreenError> {
    let seq = store.begin_applications_request().await;
    match api.applications().list().await {
        Ok(applications) => {
            info!(count = applications.len(), "applications fetched");
            store
                .dispatch(ApplicationsAction::FetchSuccessFor { seq, applications })
                .await;
            Ok(())
        }
        Err(err) => {
            let err = ScreenError::from_client(&err, FETCH_APPLICATIONS_FAILED);
            store
                .dispatch(ApplicationsAction::FetchFailureFor {
                    seq,
                    message: err.message.clone(),
                })
                .await;
            Err(err)
        }
    }
}

pub async fn load_application(
    api: &ApiClient,
    store: &Store,
    id: ApplicationId,
) -> Result<JobApplication, ScreenError> {
    let application = api
        .applications()
        .retrieve(id)
        .await
        .map_err(|err| ScreenError::from_client(&err, FETCH_APPLICATION_FAILED))?;
    store
        .dispatch(ApplicationsAction::SetSelected(application.clone()))
        .await;
    Ok(application)
}

/// Sends the status change, then mirrors it into the list and selection.
pub async fn change_status(
    api: &ApiClient,
    store: &Store,
    id: ApplicationId,
    status: ApplicationStatus,
) -> Result<(), ScreenError> {
    api.applications()
        .update_status(id, status)
        .await
        .map_err(|err| ScreenError::from_client(&err, UPDATE_APPLICATION_FAILED))?;
    store
        .dispatch(ApplicationsAction::UpdateStatus { id, status })
        .await;
    info!(application_id = %id, status = status.code(), "application status updated");
    Ok(())
}

/// Apply form on the job details screen. A resume must be chosen; on
/// success the view moves to the applications screen.
pub async fn submit_application(
    api: &ApiClient,
    job: JobId,
    resume: Option<ResumeId>,
    cover_letter: &str,
) -> Result<Navigation, ScreenError> {
    let Some(resume) = resume else {
        return Err(ScreenError::new(SELECT_RESUME));
    };

    let request = NewApplication {
        job,
        resume,
        cover_letter: cover_letter.to_string(),
    };
    api.applications()
        .create(&request)
        .await
        .map_err(|err| ScreenError::from_client(&err, SUBMIT_APPLICATION_FAILED))?;
    info!(job_id = %job, resume_id = %resume, "application submitted");
    Ok(Navigation::Applications)
}
