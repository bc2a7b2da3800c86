//! Plain-text views of client state.

use std::fmt::Write;

use client_core::{
    controller::{jobs::JobDetails, resumes::ResumeAnalysisView, ScreenError},
    store::{ApplicationsState, JobsState, RequestSlice},
    ClientError,
};
use shared::protocol::{Job, JobApplication, JobFilters, Resume, SavedJob};

pub const LOADING: &str = "Loading...";
pub const LOGIN_HINT: &str = "Your session was rejected; run `jobboard login <username>` first.";

pub fn screen_error(err: &ScreenError) -> String {
    if err.needs_login {
        format!("Error: {}\n{LOGIN_HINT}", err.message)
    } else {
        format!("Error: {}", err.message)
    }
}

/// Whether any cause of `err` is a 401/403 from the backend.
pub fn needs_login(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<ClientError>()
            .is_some_and(ClientError::is_unauthorized)
    })
}

/// Loading and error take precedence over the items, as on the list screens.
fn slice_view<T>(
    slice: &RequestSlice<T>,
    empty: &str,
    row: impl Fn(&T) -> String,
) -> String {
    if slice.loading {
        return LOADING.to_string();
    }
    if let Some(error) = &slice.error {
        return format!("Error: {error}");
    }
    if slice.items.is_empty() {
        return empty.to_string();
    }
    slice
        .items
        .iter()
        .map(row)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_salary(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("${min:.0} - ${max:.0}"),
        (Some(min), None) => format!("From ${min:.0}"),
        (None, Some(max)) => format!("Up to ${max:.0}"),
        (None, None) => "Salary not specified".to_string(),
    }
}

pub fn filters_line(filters: &JobFilters) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(job_type) = filters.job_type {
        parts.push(format!("type={job_type}"));
    }
    if let Some(level) = filters.experience_level {
        parts.push(format!("level={level}"));
    }
    if let Some(location) = filters.location.as_deref().filter(|l| !l.trim().is_empty()) {
        parts.push(format!("location={location}"));
    }
    if !filters.skills.is_empty() {
        parts.push(format!("skills={}", filters.skills.join(",")));
    }
    (!parts.is_empty()).then(|| format!("Filters: {}", parts.join(" ")))
}

pub fn job_row(job: &Job) -> String {
    format!(
        "#{} {} | {} | {} | {} | {}",
        job.id,
        job.title,
        job.location,
        job.job_type,
        job.experience_level,
        format_salary(job.salary_min, job.salary_max)
    )
}

pub fn jobs(state: &JobsState) -> String {
    let body = slice_view(&state.list, "No jobs found.", job_row);
    match filters_line(&state.filters) {
        Some(filters) => format!("{filters}\n{body}"),
        None => body,
    }
}

pub fn job(job: &Job) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", job.title, job.id);
    let _ = writeln!(out, "Location: {}", job.location);
    let _ = writeln!(out, "Type: {}", job.job_type);
    let _ = writeln!(out, "Experience: {}", job.experience_level);
    let _ = writeln!(out, "Salary: {}", format_salary(job.salary_min, job.salary_max));
    if !job.skills_required.is_empty() {
        let _ = writeln!(out, "Skills: {}", job.skills_required.join(", "));
    }
    if let Some(score) = job.match_score {
        let _ = writeln!(out, "Match score: {score:.0}%");
    }
    let _ = writeln!(out, "Posted by: {}", job.recruiter.username);
    if !job.is_active {
        let _ = writeln!(out, "Status: closed");
    }
    let _ = writeln!(out, "\n{}", job.description.trim());
    if !job.requirements.trim().is_empty() {
        let _ = writeln!(out, "\nRequirements:\n{}", job.requirements.trim());
    }
    out.trim_end().to_string()
}

pub fn job_details(details: &JobDetails, saved: Option<bool>) -> String {
    let mut out = job(&details.job);
    match saved {
        Some(true) => out.push_str("\n\nSaved: yes"),
        Some(false) => out.push_str("\n\nSaved: no"),
        None => {}
    }
    if details.resumes.is_empty() {
        out.push_str("\n\nUpload a resume before applying.");
    } else {
        out.push_str("\n\nYour resumes:\n");
        out.push_str(
            &details
                .resumes
                .iter()
                .map(resume_row)
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    out
}

pub fn application_row(application: &JobApplication) -> String {
    format!(
        "#{} {} | {} | applied {}",
        application.id,
        application.job.title,
        application.status,
        application.created_at.format("%Y-%m-%d")
    )
}

pub fn applications(state: &ApplicationsState) -> String {
    slice_view(
        &state.list,
        "You have not applied to any jobs yet.",
        application_row,
    )
}

pub fn application(application: &JobApplication) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Application #{}", application.id);
    let _ = writeln!(out, "Job: {} (#{})", application.job.title, application.job.id);
    let _ = writeln!(out, "Applicant: {}", application.applicant.username);
    match application.resume.title() {
        Some(title) => {
            let _ = writeln!(out, "Resume: {title} (#{})", application.resume.id());
        }
        None => {
            let _ = writeln!(out, "Resume: #{}", application.resume.id());
        }
    }
    let _ = writeln!(out, "Status: {}", application.status);
    if let Some(score) = application.match_score {
        let _ = writeln!(out, "Match score: {score:.0}%");
    }
    if !application.cover_letter.trim().is_empty() {
        let _ = writeln!(out, "\n{}", application.cover_letter.trim());
    }
    out.trim_end().to_string()
}

pub fn saved_jobs(saved: &RequestSlice<SavedJob>) -> String {
    slice_view(saved, "No saved jobs.", |entry| job_row(&entry.job))
}

pub fn resume_row(resume: &Resume) -> String {
    format!(
        "#{} {} | uploaded {}",
        resume.id,
        resume.title,
        resume.created_at.format("%Y-%m-%d")
    )
}

pub fn resumes(resumes: &[Resume]) -> String {
    if resumes.is_empty() {
        return "No resumes uploaded.".to_string();
    }
    resumes.iter().map(resume_row).collect::<Vec<_>>().join("\n")
}

pub fn resume(resume: &Resume) -> String {
    format!("{}\nFile: {}", resume_row(resume), resume.file)
}

pub fn resume_analysis(view: &ResumeAnalysisView) -> String {
    let analysis = &view.analysis;
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", view.resume.title, view.resume.id);
    let _ = writeln!(out, "Overall score: {:.0}", analysis.overall_score);
    for (heading, entries) in [
        ("Skills", &analysis.skills),
        ("Experience", &analysis.experience),
        ("Education", &analysis.education),
    ] {
        if !entries.is_empty() {
            let _ = writeln!(out, "{heading}: {}", entries.join(", "));
        }
    }
    if view.feedback.is_empty() {
        let _ = writeln!(out, "No feedback.");
    } else {
        let _ = writeln!(out, "Feedback:");
        for item in &view.feedback {
            let _ = writeln!(
                out,
                "- [{}] {}: {}",
                item.severity, item.feedback_type, item.message
            );
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
