use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shared::{
    domain::{
        ApplicationId, ApplicationStatus, ExperienceLevel, JobId, JobType, ResumeId, UserRole,
    },
    protocol::{JobFilters, JobPatch, JobSearch, NewJob},
};

#[derive(Parser, Debug)]
#[command(name = "jobboard", version, about = "Command-line client for the job board")]
pub struct Cli {
    /// Settings file (defaults to ./jobboard.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Backend base url, e.g. http://localhost:8000/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "applicant")]
        role: UserRole,
    },
    Logout,
    Whoami,
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// Apply to a job with one of your resumes
    Apply {
        job: JobId,
        #[arg(long)]
        resume: Option<ResumeId>,
        #[arg(long, default_value = "")]
        cover_letter: String,
    },
    #[command(subcommand)]
    Applications(ApplicationsCommand),
    #[command(subcommand)]
    Resumes(ResumesCommand),
    #[command(subcommand)]
    Saved(SavedCommand),
}

#[derive(Subcommand, Debug)]
pub enum JobsCommand {
    List(FilterArgs),
    Show {
        id: JobId,
    },
    Search(SearchArgs),
    Create(NewJobArgs),
    Update {
        id: JobId,
        #[command(flatten)]
        changes: JobPatchArgs,
    },
    Delete {
        id: JobId,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    #[arg(long)]
    pub job_type: Option<JobType>,
    #[arg(long)]
    pub experience_level: Option<ExperienceLevel>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long = "skill")]
    pub skills: Vec<String>,
}

impl From<FilterArgs> for JobFilters {
    fn from(args: FilterArgs) -> Self {
        JobFilters {
            job_type: args.job_type,
            experience_level: args.experience_level,
            location: args.location,
            skills: args.skills,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[command(flatten)]
    pub filters: FilterArgs,
    #[arg(long)]
    pub salary_min: Option<f64>,
    #[arg(long)]
    pub salary_max: Option<f64>,
}

impl From<SearchArgs> for JobSearch {
    fn from(args: SearchArgs) -> Self {
        JobSearch {
            title: args.title,
            location: args.filters.location,
            job_type: args.filters.job_type,
            experience_level: args.filters.experience_level,
            skills: args.filters.skills,
            salary_min: args.salary_min,
            salary_max: args.salary_max,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct NewJobArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, default_value = "")]
    pub requirements: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub salary_min: Option<f64>,
    #[arg(long)]
    pub salary_max: Option<f64>,
    #[arg(long)]
    pub job_type: JobType,
    #[arg(long)]
    pub experience_level: ExperienceLevel,
    #[arg(long = "skill")]
    pub skills: Vec<String>,
    /// Create the posting without publishing it
    #[arg(long)]
    pub inactive: bool,
}

impl From<NewJobArgs> for NewJob {
    fn from(args: NewJobArgs) -> Self {
        NewJob {
            title: args.title,
            description: args.description,
            requirements: args.requirements,
            location: args.location,
            salary_min: args.salary_min,
            salary_max: args.salary_max,
            job_type: args.job_type,
            experience_level: args.experience_level,
            skills_required: args.skills,
            is_active: !args.inactive,
        }
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct JobPatchArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub requirements: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub salary_min: Option<f64>,
    #[arg(long)]
    pub salary_max: Option<f64>,
    #[arg(long)]
    pub job_type: Option<JobType>,
    #[arg(long)]
    pub experience_level: Option<ExperienceLevel>,
    /// Replaces the required skills; repeat for several
    #[arg(long = "skill")]
    pub skills: Option<Vec<String>>,
    #[arg(long)]
    pub active: Option<bool>,
}

impl From<JobPatchArgs> for JobPatch {
    fn from(args: JobPatchArgs) -> Self {
        JobPatch {
            title: args.title,
            description: args.description,
            requirements: args.requirements,
            location: args.location,
            salary_min: args.salary_min,
            salary_max: args.salary_max,
            job_type: args.job_type,
            experience_level: args.experience_level,
            skills_required: args.skills,
            is_active: args.active,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ApplicationsCommand {
    List,
    Show {
        id: ApplicationId,
    },
    Status {
        id: ApplicationId,
        status: ApplicationStatus,
    },
}

#[derive(Subcommand, Debug)]
pub enum ResumesCommand {
    List,
    /// Upload a .pdf or .docx resume
    Upload {
        path: PathBuf,
        #[arg(long)]
        title: String,
    },
    Show {
        id: ResumeId,
    },
    Delete {
        id: ResumeId,
    },
    Analysis {
        id: ResumeId,
    },
}

#[derive(Subcommand, Debug)]
pub enum SavedCommand {
    List,
    Add { job: JobId },
    Remove { job: JobId },
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
