//! Screen controllers: each runs one screen's fetch/dispatch flow against the
//! api client and the store, and reports failures as a single message.

pub mod applications;
pub mod jobs;
pub mod resumes;
pub mod saved_jobs;

use thiserror::Error;
use tracing::warn;

use crate::error::ClientError;

pub const FETCH_JOBS_FAILED: &str = "Failed to fetch jobs";
pub const FETCH_JOB_DETAILS_FAILED: &str = "Failed to fetch job details";
pub const FETCH_APPLICATIONS_FAILED: &str = "Failed to fetch applications";
pub const FETCH_APPLICATION_FAILED: &str = "Failed to fetch application";
pub const UPDATE_APPLICATION_FAILED: &str = "Failed to update application status";
pub const SUBMIT_APPLICATION_FAILED: &str = "Failed to submit application";
pub const FETCH_SAVED_JOBS_FAILED: &str = "Failed to fetch saved jobs";
pub const SAVE_JOB_FAILED: &str = "Failed to save job";
pub const UNSAVE_JOB_FAILED: &str = "Failed to unsave job";
pub const FETCH_RESUME_ANALYSIS_FAILED: &str = "Failed to fetch resume analysis";
pub const SELECT_RESUME: &str = "Please select a resume";

/// What a screen shows in place of its content when a flow fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScreenError {
    pub message: String,
    /// The backend refused the stored credentials (401/403).
    pub needs_login: bool,
}

impl ScreenError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            needs_login: false,
        }
    }

    pub(crate) fn from_client(err: &ClientError, fallback: &str) -> Self {
        warn!("{fallback}: {err}");
        Self {
            message: err.display_message(fallback),
            needs_login: err.is_unauthorized(),
        }
    }
}

/// Where the view layer should go after a flow completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Applications,
}
