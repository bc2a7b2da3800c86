mod cli;
mod config;
mod render;

use std::{process::ExitCode, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    controller::{
        applications::{change_status, fetch_applications, load_application, submit_application},
        jobs::{fetch_jobs, load_job_details, search_jobs},
        resumes::load_resume_analysis,
        saved_jobs::{is_saved, toggle_saved, SavedJobsScreen},
        Navigation, ScreenError,
    },
    ApiClient, FileTokenStore, Store,
};
use shared::protocol::{JobFilters, JobFiltersPatch, JobPatch, LoginRequest, RegisterRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{ApplicationsCommand, Cli, Command, JobsCommand, ResumesCommand, SavedCommand};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = config::load_settings(cli.config.as_deref())?
        .with_api_url_override(cli.api_url.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let tokens = Arc::new(FileTokenStore::new(&settings.token_path));
    let api = ApiClient::new(&settings.api_url, tokens)?;
    info!(api_url = %settings.api_url, "client ready");

    let result = run(cli.command, &api, &Store::new()).await;
    if let Err(err) = &result {
        if render::needs_login(err) {
            eprintln!("{}", render::LOGIN_HINT);
        }
    }
    result
}

/// Prints the screen and turns its outcome into the exit status.
fn finish(view: String, outcome: Result<(), ScreenError>) -> ExitCode {
    println!("{view}");
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.needs_login {
                println!("{}", render::LOGIN_HINT);
            }
            ExitCode::FAILURE
        }
    }
}

fn fail(err: ScreenError) -> ExitCode {
    println!("{}", render::screen_error(&err));
    ExitCode::FAILURE
}

async fn run(command: Command, api: &ApiClient, store: &Store) -> Result<ExitCode> {
    match command {
        Command::Login { username, password } => {
            let session = api
                .auth()
                .login(&LoginRequest { username, password })
                .await
                .context("login failed")?;
            println!("Logged in as {}", session.user.username);
        }
        Command::Register {
            username,
            email,
            password,
            role,
        } => {
            let session = api
                .auth()
                .register(&RegisterRequest {
                    username,
                    email,
                    password,
                    role,
                })
                .await
                .context("registration failed")?;
            println!("Registered and logged in as {}", session.user.username);
        }
        Command::Logout => {
            api.auth().logout().await?;
            println!("Logged out");
        }
        Command::Whoami => match api.session().await? {
            Some(session) => println!(
                "{}",
                session.username.as_deref().unwrap_or("Logged in (unknown user)")
            ),
            None => println!("Not logged in"),
        },
        Command::Jobs(command) => return jobs(command, api, store).await,
        Command::Apply {
            job,
            resume,
            cover_letter,
        } => {
            return match submit_application(api, job, resume, &cover_letter).await {
                Ok(Navigation::Applications) => {
                    println!("Application submitted");
                    let outcome = fetch_applications(api, store).await;
                    let state = store.snapshot().await;
                    Ok(finish(render::applications(&state.applications), outcome))
                }
                Ok(Navigation::Stay) => Ok(ExitCode::SUCCESS),
                Err(err) => Ok(fail(err)),
            };
        }
        Command::Applications(command) => return applications(command, api, store).await,
        Command::Resumes(command) => return resumes(command, api).await,
        Command::Saved(command) => return saved(command, api).await,
    }
    Ok(ExitCode::SUCCESS)
}

async fn jobs(command: JobsCommand, api: &ApiClient, store: &Store) -> Result<ExitCode> {
    match command {
        JobsCommand::List(filters) => {
            let patch = JobFiltersPatch::from(JobFilters::from(filters));
            let outcome = fetch_jobs(api, store, Some(patch)).await;
            let state = store.snapshot().await;
            Ok(finish(render::jobs(&state.jobs), outcome))
        }
        JobsCommand::Search(args) => {
            let outcome = search_jobs(api, store, &args.into()).await;
            let state = store.snapshot().await;
            Ok(finish(render::jobs(&state.jobs), outcome))
        }
        JobsCommand::Show { id } => match load_job_details(api, store, id).await {
            Ok(details) => {
                let saved = is_saved(api, id).await.ok();
                println!("{}", render::job_details(&details, saved));
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => Ok(fail(err)),
        },
        JobsCommand::Create(args) => {
            let job = api
                .jobs()
                .create(&args.into())
                .await
                .context("failed to create job")?;
            println!("{}", render::job(&job));
            Ok(ExitCode::SUCCESS)
        }
        JobsCommand::Update { id, changes } => {
            let patch = JobPatch::from(changes);
            if patch.is_empty() {
                bail!("nothing to update; pass at least one field");
            }
            let job = api
                .jobs()
                .update(id, &patch)
                .await
                .context("failed to update job")?;
            println!("{}", render::job(&job));
            Ok(ExitCode::SUCCESS)
        }
        JobsCommand::Delete { id } => {
            api.jobs()
                .delete(id)
                .await
                .context("failed to delete job")?;
            println!("Deleted job #{id}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn applications(
    command: ApplicationsCommand,
    api: &ApiClient,
    store: &Store,
) -> Result<ExitCode> {
    match command {
        ApplicationsCommand::List => {
            let outcome = fetch_applications(api, store).await;
            let state = store.snapshot().await;
            Ok(finish(render::applications(&state.applications), outcome))
        }
        ApplicationsCommand::Show { id } => match load_application(api, store, id).await {
            Ok(application) => {
                println!("{}", render::application(&application));
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => Ok(fail(err)),
        },
        ApplicationsCommand::Status { id, status } => {
            if let Err(err) = load_application(api, store, id).await {
                return Ok(fail(err));
            }
            if let Err(err) = change_status(api, store, id, status).await {
                return Ok(fail(err));
            }
            let view = store
                .read(|s| s.applications.selected_application().map(render::application))
                .await
                .unwrap_or_default();
            println!("{view}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn resumes(command: ResumesCommand, api: &ApiClient) -> Result<ExitCode> {
    let resumes = api.resumes();
    match command {
        ResumesCommand::List => {
            let list = resumes.list().await.context("failed to fetch resumes")?;
            println!("{}", render::resumes(&list));
        }
        ResumesCommand::Upload { path, title } => {
            let resume = resumes
                .upload(&path, &title)
                .await
                .context("failed to upload resume")?;
            println!("Uploaded {}", render::resume_row(&resume));
        }
        ResumesCommand::Show { id } => {
            let resume = resumes
                .retrieve(id)
                .await
                .context("failed to fetch resume")?;
            println!("{}", render::resume(&resume));
        }
        ResumesCommand::Delete { id } => {
            resumes
                .delete(id)
                .await
                .context("failed to delete resume")?;
            println!("Deleted resume #{id}");
        }
        ResumesCommand::Analysis { id } => {
            return match load_resume_analysis(api, id).await {
                Ok(view) => {
                    println!("{}", render::resume_analysis(&view));
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => Ok(fail(err)),
            };
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn saved(command: SavedCommand, api: &ApiClient) -> Result<ExitCode> {
    let mut screen = SavedJobsScreen::new();
    match command {
        SavedCommand::List => {
            let outcome = screen.load(api).await;
            Ok(finish(render::saved_jobs(&screen.saved), outcome))
        }
        SavedCommand::Add { job } => match toggle_saved(api, job, false).await {
            Ok(_) => {
                println!("Saved job #{job}");
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => Ok(fail(err)),
        },
        SavedCommand::Remove { job } => {
            if let Err(err) = screen.load(api).await {
                return Ok(fail(err));
            }
            let outcome = screen.unsave(api, job).await;
            Ok(finish(render::saved_jobs(&screen.saved), outcome))
        }
    }
}
