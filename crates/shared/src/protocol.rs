use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{
    AnalysisId, ApplicationId, ApplicationStatus, ExperienceLevel, FeedbackId, FeedbackType,
    JobId, JobType, ResumeId, SavedJobId, Severity, UserId, UserRole,
};

/// Decimal fields come back from the backend as strings (`"50000.00"`);
/// older payloads and fixtures send plain numbers. Accept both.
fn de_opt_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid decimal '{s}': {e}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub location: String,
    #[serde(
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary_min: Option<f64>,
    #[serde(
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary_max: Option<f64>,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub recruiter: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: ResumeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Applications reference their resume by primary key in list/detail
/// responses, but some endpoints nest the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResumeRef {
    Id(ResumeId),
    Record(Box<Resume>),
}

impl ResumeRef {
    pub fn id(&self) -> ResumeId {
        match self {
            ResumeRef::Id(id) => *id,
            ResumeRef::Record(resume) => resume.id,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            ResumeRef::Id(_) => None,
            ResumeRef::Record(resume) => Some(resume.title.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job: Job,
    pub applicant: User,
    pub resume: ResumeRef,
    #[serde(default)]
    pub cover_letter: String,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AnalysisId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumeRef>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub overall_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeedbackId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumeRef>,
    pub feedback_type: FeedbackType,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJob {
    pub id: SavedJobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub job: Job,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Filters held by the jobs slice and sent as query parameters on list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilters {
    pub job_type: Option<JobType>,
    pub experience_level: Option<ExperienceLevel>,
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl JobFilters {
    /// Query pairs for `GET /jobs/`: unset and blank values are left out and
    /// each skill becomes its own `skills` parameter.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(job_type) = self.job_type {
            pairs.push(("job_type", job_type.code().to_string()));
        }
        if let Some(level) = self.experience_level {
            pairs.push(("experience_level", level.code().to_string()));
        }
        if let Some(location) = self.location.as_deref().map(str::trim) {
            if !location.is_empty() {
                pairs.push(("location", location.to_string()));
            }
        }
        for skill in &self.skills {
            let skill = skill.trim();
            if !skill.is_empty() {
                pairs.push(("skills", skill.to_string()));
            }
        }
        pairs
    }
}

/// Partial filter update; only `Some` fields replace the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFiltersPatch {
    pub job_type: Option<Option<JobType>>,
    pub experience_level: Option<Option<ExperienceLevel>>,
    pub location: Option<Option<String>>,
    pub skills: Option<Vec<String>>,
}

impl From<JobFilters> for JobFiltersPatch {
    fn from(value: JobFilters) -> Self {
        Self {
            job_type: Some(value.job_type),
            experience_level: Some(value.experience_level),
            location: Some(value.location),
            skills: Some(value.skills),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub skills_required: Vec<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_required: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self == &JobPatch::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub job: JobId,
    pub resume: ResumeId,
    pub cover_letter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStatusUpdate {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveJobRequest {
    pub job: JobId,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
