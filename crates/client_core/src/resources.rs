//! Resource call groups, one method per backend endpoint.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use shared::{
    domain::{ApplicationId, ApplicationStatus, JobId, ResumeId, SavedJobId},
    protocol::{
        ApplicationStatusUpdate, AuthSession, Job, JobApplication, JobFilters, JobPatch,
        JobSearch, LoginRequest, NewApplication, NewJob, RegisterRequest, Resume,
        ResumeAnalysis, ResumeFeedback, SaveJobRequest, SavedJob,
    },
};
use tracing::info;

use crate::{
    error::{ClientError, Result},
    http::ApiClient,
    session::StoredSession,
};

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthSession> {
        let session: AuthSession = self.client.post("/auth/login/", request).await?;
        self.remember(&session).await?;
        info!(username = %session.user.username, "logged in");
        Ok(session)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthSession> {
        let session: AuthSession = self.client.post("/auth/register/", request).await?;
        self.remember(&session).await?;
        info!(username = %session.user.username, "registered");
        Ok(session)
    }

    /// Forgets the stored token. The backend keeps no server-side session.
    pub async fn logout(&self) -> Result<()> {
        self.client.clear_session().await
    }

    async fn remember(&self, session: &AuthSession) -> Result<()> {
        self.client
            .store_session(&StoredSession {
                token: session.token.clone(),
                username: Some(session.user.username.clone()),
            })
            .await
    }
}

pub struct JobsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> JobsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &JobFilters) -> Result<Vec<Job>> {
        self.client
            .get_with_query("/jobs/", &filters.query_pairs())
            .await
    }

    pub async fn create(&self, job: &NewJob) -> Result<Job> {
        self.client.post("/jobs/", job).await
    }

    pub async fn retrieve(&self, id: JobId) -> Result<Job> {
        self.client.get(&format!("/jobs/{id}/")).await
    }

    pub async fn update(&self, id: JobId, patch: &JobPatch) -> Result<Job> {
        self.client.patch(&format!("/jobs/{id}/"), patch).await
    }

    pub async fn delete(&self, id: JobId) -> Result<()> {
        self.client.delete(&format!("/jobs/{id}/")).await
    }

    pub async fn search(&self, search: &JobSearch) -> Result<Vec<Job>> {
        self.client.post("/jobs/search/", search).await
    }
}

pub struct ApplicationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ApplicationsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<JobApplication>> {
        self.client.get("/applications/").await
    }

    pub async fn create(&self, application: &NewApplication) -> Result<JobApplication> {
        self.client.post("/applications/", application).await
    }

    pub async fn retrieve(&self, id: ApplicationId) -> Result<JobApplication> {
        self.client.get(&format!("/applications/{id}/")).await
    }

    pub async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<JobApplication> {
        self.client
            .patch(
                &format!("/applications/{id}/"),
                &ApplicationStatusUpdate { status },
            )
            .await
    }
}

/// Resume file types the backend accepts.
pub fn resume_mime_type(file_name: &str) -> Result<&'static str> {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        Ok("application/pdf")
    } else if lower.ends_with(".docx") {
        Ok("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
    } else {
        Err(ClientError::Validation(format!(
            "Unsupported resume format: {file_name} (use .pdf or .docx)"
        )))
    }
}

/// File part for a multipart form. A malformed `mime` is a local failure,
/// reported before anything is sent.
pub(crate) fn file_part(file_name: &str, bytes: Vec<u8>, mime: &str) -> Result<Part> {
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .map_err(|err| {
            ClientError::Validation(format!("Invalid content type '{mime}' for {file_name}: {err}"))
        })
}

pub struct ResumesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ResumesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Resume>> {
        self.client.get("/resumes/").await
    }

    /// Reads `path` and uploads it under `title`.
    pub async fn upload(&self, path: &Path, title: &str) -> Result<Resume> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ClientError::Validation(format!("not a file path: {}", path.display()))
            })?
            .to_string();
        resume_mime_type(&file_name)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        self.upload_bytes(&file_name, bytes, title).await
    }

    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>, title: &str) -> Result<Resume> {
        let part = file_part(file_name, bytes, resume_mime_type(file_name)?)?;
        let form = Form::new().text("title", title.to_string()).part("file", part);
        let resume: Resume = self.client.post_multipart("/resumes/", form).await?;
        info!(resume_id = %resume.id, "resume uploaded");
        Ok(resume)
    }

    pub async fn retrieve(&self, id: ResumeId) -> Result<Resume> {
        self.client.get(&format!("/resumes/{id}/")).await
    }

    pub async fn delete(&self, id: ResumeId) -> Result<()> {
        self.client.delete(&format!("/resumes/{id}/")).await
    }

    pub async fn analysis(&self, id: ResumeId) -> Result<ResumeAnalysis> {
        self.client.get(&format!("/resumes/{id}/analysis/")).await
    }

    pub async fn feedback(&self, id: ResumeId) -> Result<Vec<ResumeFeedback>> {
        self.client.get(&format!("/resumes/{id}/feedback/")).await
    }
}

pub struct SavedJobsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SavedJobsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<SavedJob>> {
        self.client.get("/saved-jobs/").await
    }

    pub async fn save(&self, job: JobId) -> Result<()> {
        self.client
            .post_discard("/saved-jobs/", &SaveJobRequest { job })
            .await
    }

    pub async fn unsave(&self, id: SavedJobId) -> Result<()> {
        self.client.delete(&format!("/saved-jobs/{id}/")).await
    }
}
