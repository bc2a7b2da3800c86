use shared::{
    domain::{ApplicationId, ApplicationStatus},
    protocol::JobApplication,
};

use super::slice::{RequestSeq, RequestSlice};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationsState {
    pub list: RequestSlice<JobApplication>,
}

impl ApplicationsState {
    pub fn applications(&self) -> &[JobApplication] {
        &self.list.items
    }

    pub fn selected_application(&self) -> Option<&JobApplication> {
        self.list.selected.as_ref()
    }
}

#[derive(Debug, Clone)]
pub enum ApplicationsAction {
    FetchStart,
    FetchSuccess(Vec<JobApplication>),
    FetchFailure(String),
    FetchSuccessFor {
        seq: RequestSeq,
        applications: Vec<JobApplication>,
    },
    FetchFailureFor {
        seq: RequestSeq,
        message: String,
    },
    SetSelected(JobApplication),
    UpdateStatus {
        id: ApplicationId,
        status: ApplicationStatus,
    },
}

pub fn reduce(state: &mut ApplicationsState, action: ApplicationsAction) {
    match action {
        ApplicationsAction::FetchStart => {
            state.list.start();
        }
        ApplicationsAction::FetchSuccess(applications) => state.list.success(applications),
        ApplicationsAction::FetchFailure(message) => state.list.failure(message),
        ApplicationsAction::FetchSuccessFor { seq, applications } => {
            state.list.success_for(seq, applications);
        }
        ApplicationsAction::FetchFailureFor { seq, message } => {
            state.list.failure_for(seq, message);
        }
        ApplicationsAction::SetSelected(application) => state.list.set_selected(application),
        ApplicationsAction::UpdateStatus { id, status } => {
            if let Some(application) = state.list.items.iter_mut().find(|a| a.id == id) {
                application.status = status;
            }
            if let Some(selected) = state.list.selected.as_mut().filter(|a| a.id == id) {
                selected.status = status;
            }
        }
    }
}
