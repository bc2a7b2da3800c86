use shared::protocol::{Job, JobFilters, JobFiltersPatch};

use super::slice::{RequestSeq, RequestSlice};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobsState {
    pub list: RequestSlice<Job>,
    pub filters: JobFilters,
}

impl JobsState {
    pub fn jobs(&self) -> &[Job] {
        &self.list.items
    }

    pub fn selected_job(&self) -> Option<&Job> {
        self.list.selected.as_ref()
    }
}

#[derive(Debug, Clone)]
pub enum JobsAction {
    FetchStart,
    FetchSuccess(Vec<Job>),
    FetchFailure(String),
    FetchSuccessFor { seq: RequestSeq, jobs: Vec<Job> },
    FetchFailureFor { seq: RequestSeq, message: String },
    SetSelected(Job),
    SetFilters(JobFiltersPatch),
    ClearFilters,
}

pub fn reduce(state: &mut JobsState, action: JobsAction) {
    match action {
        JobsAction::FetchStart => {
            state.list.start();
        }
        JobsAction::FetchSuccess(jobs) => state.list.success(jobs),
        JobsAction::FetchFailure(message) => state.list.failure(message),
        JobsAction::FetchSuccessFor { seq, jobs } => {
            state.list.success_for(seq, jobs);
        }
        JobsAction::FetchFailureFor { seq, message } => {
            state.list.failure_for(seq, message);
        }
        JobsAction::SetSelected(job) => state.list.set_selected(job),
        JobsAction::SetFilters(patch) => merge_filters(&mut state.filters, patch),
        JobsAction::ClearFilters => state.filters = JobFilters::default(),
    }
}

fn merge_filters(filters: &mut JobFilters, patch: JobFiltersPatch) {
    if let Some(job_type) = patch.job_type {
        filters.job_type = job_type;
    }
    if let Some(level) = patch.experience_level {
        filters.experience_level = level;
    }
    if let Some(location) = patch.location {
        filters.location = location;
    }
    if let Some(skills) = patch.skills {
        filters.skills = skills;
    }
}
