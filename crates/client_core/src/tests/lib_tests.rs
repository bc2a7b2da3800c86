use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Multipart, Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::{
    domain::{ApplicationId, ApplicationStatus, ExperienceLevel, JobId, JobType, ResumeId},
    protocol::{JobFilters, JobFiltersPatch, JobPatch, JobSearch, LoginRequest, NewJob},
};
use tokio::{net::TcpListener, sync::Mutex};

use super::*;
use crate::controller::{
    applications::{change_status, fetch_applications, load_application, submit_application},
    jobs::{fetch_jobs, load_job_details, search_jobs},
    resumes::load_resume_analysis,
    saved_jobs::{is_saved, toggle_saved, SavedJobsScreen},
    Navigation,
};
use crate::store::{ApplicationsAction, JobsAction, RequestStatus};

#[derive(Clone, Default)]
struct Recorded {
    queries: Arc<Mutex<Vec<Option<String>>>>,
    auth_headers: Arc<Mutex<Vec<Option<String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    deleted: Arc<Mutex<Vec<i64>>>,
    uploads: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

fn user_json(id: i64, username: &str) -> Value {
    json!({"id": id, "username": username, "email": format!("{username}@example.com")})
}

fn job_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "Build things",
        "requirements": "Rust",
        "location": "Remote",
        "salary_min": "60000.00",
        "salary_max": "90000.00",
        "job_type": "FT",
        "experience_level": "MD",
        "skills_required": ["rust"],
        "is_active": true,
        "recruiter": user_json(9, "rita"),
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-01T10:00:00Z"
    })
}

fn application_json(id: i64, job_id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "job": job_json(job_id, "Backend Engineer"),
        "applicant": user_json(2, "ann"),
        "resume": 2,
        "cover_letter": "Hello",
        "status": status,
        "match_score": null,
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-01T10:00:00Z"
    })
}

fn saved_json(id: i64, job_id: i64) -> Value {
    json!({
        "id": id,
        "user": user_json(2, "ann"),
        "job": job_json(job_id, &format!("Job {job_id}")),
        "created_at": "2024-03-01T10:00:00Z"
    })
}

fn resume_json(id: i64) -> Value {
    json!({
        "id": id,
        "title": "Main CV",
        "file": "/media/resumes/cv.pdf",
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-01T10:00:00Z"
    })
}

fn auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn list_jobs(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    rec.auth_headers.lock().await.push(auth_header(&headers));
    rec.queries.lock().await.push(query);
    Json(json!([job_json(1, "Backend Engineer"), job_json(2, "Data Engineer")]))
}

/// `job_type=FT` answers slowly, anything else immediately.
async fn list_jobs_slow_for_full_time(RawQuery(query): RawQuery) -> Json<Value> {
    if query.as_deref().unwrap_or_default().contains("job_type=FT") {
        tokio::time::sleep(Duration::from_millis(250)).await;
        Json(json!([job_json(1, "Slow full-time")]))
    } else {
        Json(json!([job_json(2, "Fast part-time")]))
    }
}

async fn failing_with_message() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "Database unavailable"})),
    )
}

async fn failing_with_html() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
}

async fn create_application(State(rec): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    rec.bodies.lock().await.push(body);
    Json(application_json(31, 5, "P"))
}

async fn list_applications() -> Json<Value> {
    Json(json!([application_json(31, 5, "P"), application_json(32, 6, "R")]))
}

async fn patch_application(
    State(rec): State<Recorded>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let status = body["status"].as_str().unwrap_or("P").to_string();
    rec.bodies.lock().await.push(body);
    Json(application_json(id, 5, &status))
}

async fn list_saved() -> Json<Value> {
    Json(json!([saved_json(11, 1), saved_json(12, 2), saved_json(13, 3)]))
}

async fn record_delete(State(rec): State<Recorded>, Path(id): Path<i64>) -> StatusCode {
    rec.deleted.lock().await.push(id);
    StatusCode::NO_CONTENT
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({"user": user_json(2, "ann"), "token": "tok-123"})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
    }
}

async fn retrieve_job(Path(id): Path<i64>) -> Json<Value> {
    Json(job_json(id, "Backend Engineer"))
}

async fn list_resumes() -> Json<Value> {
    Json(json!([resume_json(2), resume_json(3)]))
}

async fn retrieve_resume(Path(id): Path<i64>) -> Json<Value> {
    Json(resume_json(id))
}

async fn missing_analysis() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."})))
}

async fn feedback() -> Json<Value> {
    Json(json!([{
        "feedback_type": "ats",
        "message": "Add keywords",
        "severity": "medium",
        "created_at": "2024-03-01T10:00:00Z"
    }]))
}

async fn upload_resume(State(rec): State<Recorded>, mut multipart: Multipart) -> Json<Value> {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        rec.uploads.lock().await.push((name, file_name));
    }
    Json(resume_json(40))
}

async fn search(State(rec): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    rec.bodies.lock().await.push(body);
    Json(json!([job_json(7, "Rust developer")]))
}

async fn rejected_search() -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"salary_min": ["A valid number is required."]})),
    )
}

async fn create_job(State(rec): State<Recorded>, Json(body): Json<Value>) -> impl IntoResponse {
    let title = body["title"].as_str().unwrap_or_default().to_string();
    rec.bodies.lock().await.push(body);
    (StatusCode::CREATED, Json(job_json(20, &title)))
}

async fn patch_job(
    State(rec): State<Recorded>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let title = body["title"].as_str().unwrap_or("Unchanged").to_string();
    rec.bodies.lock().await.push(body);
    Json(job_json(id, &title))
}

async fn save_job(State(rec): State<Recorded>, Json(body): Json<Value>) -> impl IntoResponse {
    let job = body["job"].as_i64().unwrap_or_default();
    rec.bodies.lock().await.push(body);
    (StatusCode::CREATED, Json(saved_json(14, job)))
}

async fn retrieve_application(Path(id): Path<i64>) -> Json<Value> {
    Json(application_json(id, 5, "R"))
}

async fn unauthenticated() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Authentication credentials were not provided."})),
    )
}

async fn spawn_backend(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/api")
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Arc::new(MemoryTokenStore::new())).expect("client")
}

fn client_with_token(base_url: &str, token: &str) -> ApiClient {
    ApiClient::new(base_url, Arc::new(MemoryTokenStore::with_token(token))).expect("client")
}

#[tokio::test]
async fn fetch_jobs_with_filters_stores_jobs_and_filters() {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/jobs/", get(list_jobs))
        .with_state(rec.clone());
    let base = spawn_backend(app).await;
    let api = client(&base);
    let store = Store::new();

    let filters = JobFilters {
        job_type: Some(JobType::FullTime),
        location: Some("Remote".to_string()),
        ..JobFilters::default()
    };
    fetch_jobs(&api, &store, Some(JobFiltersPatch::from(filters.clone())))
        .await
        .expect("fetch");

    let state = store.snapshot().await;
    assert!(!state.jobs.list.loading);
    assert_eq!(state.jobs.list.error, None);
    assert_eq!(state.jobs.list.status(), RequestStatus::Succeeded);
    let ids: Vec<_> = state.jobs.jobs().iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![JobId(1), JobId(2)]);
    assert_eq!(state.jobs.jobs()[0].salary_min, Some(60000.0));
    assert_eq!(state.jobs.filters, filters);
    assert_eq!(
        rec.queries.lock().await.as_slice(),
        &[Some("job_type=FT&location=Remote".to_string())]
    );
}

#[tokio::test]
async fn list_query_repeats_skills_parameter() {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/jobs/", get(list_jobs))
        .with_state(rec.clone());
    let base = spawn_backend(app).await;
    let api = client(&base);

    let filters = JobFilters {
        experience_level: Some(ExperienceLevel::Senior),
        skills: vec!["rust".to_string(), "sql".to_string()],
        ..JobFilters::default()
    };
    api.jobs().list(&filters).await.expect("list");

    assert_eq!(
        rec.queries.lock().await.as_slice(),
        &[Some("experience_level=SR&skills=rust&skills=sql".to_string())]
    );
}

#[tokio::test]
async fn fetch_jobs_failure_keeps_items_and_surfaces_backend_message() {
    let app = Router::new().route("/api/jobs/", get(failing_with_message));
    let base = spawn_backend(app).await;
    let api = client(&base);
    let store = Store::new();
    store
        .dispatch(JobsAction::FetchSuccess(vec![serde_json::from_value(
            job_json(7, "Old listing"),
        )
        .expect("job")]))
        .await;

    let err = fetch_jobs(&api, &store, None).await.expect_err("must fail");
    assert_eq!(err.message, "Database unavailable");

    let state = store.snapshot().await;
    assert!(!state.jobs.list.loading);
    assert_eq!(state.jobs.list.error.as_deref(), Some("Database unavailable"));
    assert_eq!(state.jobs.jobs().len(), 1);
    assert_eq!(state.jobs.jobs()[0].id, JobId(7));
}

#[tokio::test]
async fn fetch_jobs_failure_without_message_uses_screen_fallback() {
    let app = Router::new().route("/api/jobs/", get(failing_with_html));
    let base = spawn_backend(app).await;
    let api = client(&base);
    let store = Store::new();

    let err = fetch_jobs(&api, &store, None).await.expect_err("must fail");
    assert_eq!(err.message, "Failed to fetch jobs");
    assert_eq!(
        store.read(|s| s.jobs.list.error.clone()).await.as_deref(),
        Some("Failed to fetch jobs")
    );
}

#[tokio::test]
async fn unreachable_backend_uses_screen_fallback() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let api = client(&format!("http://{addr}/api"));
    let store = Store::new();

    let err = fetch_applications(&api, &store).await.expect_err("must fail");
    assert_eq!(err.message, "Failed to fetch applications");
    assert_eq!(
        store.read(|s| s.applications.list.status()).await,
        RequestStatus::Failed
    );
}

#[tokio::test]
async fn newer_request_wins_over_slower_older_one() {
    let app = Router::new().route("/api/jobs/", get(list_jobs_slow_for_full_time));
    let base = spawn_backend(app).await;
    let api = client(&base);
    let store = Store::new();

    let full_time = JobFiltersPatch {
        job_type: Some(Some(JobType::FullTime)),
        ..JobFiltersPatch::default()
    };
    let part_time = JobFiltersPatch {
        job_type: Some(Some(JobType::PartTime)),
        ..JobFiltersPatch::default()
    };

    let (slow, fast) = tokio::join!(fetch_jobs(&api, &store, Some(full_time)), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        fetch_jobs(&api, &store, Some(part_time)).await
    });
    slow.expect("slow fetch");
    fast.expect("fast fetch");

    let state = store.snapshot().await;
    assert!(!state.jobs.list.loading);
    assert_eq!(state.jobs.filters.job_type, Some(JobType::PartTime));
    let titles: Vec<_> = state.jobs.jobs().iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, vec!["Fast part-time"]);
}

#[tokio::test]
async fn bearer_header_sent_only_when_token_stored() {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/jobs/", get(list_jobs))
        .with_state(rec.clone());
    let base = spawn_backend(app).await;

    client_with_token(&base, "abc")
        .jobs()
        .list(&JobFilters::default())
        .await
        .expect("with token");
    client(&base)
        .jobs()
        .list(&JobFilters::default())
        .await
        .expect("without token");

    assert_eq!(
        rec.auth_headers.lock().await.as_slice(),
        &[Some("Bearer abc".to_string()), None]
    );
}

#[tokio::test]
async fn submit_application_sends_exactly_three_fields() {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/applications/", post(create_application))
        .with_state(rec.clone());
    let base = spawn_backend(app).await;
    let api = client(&base);

    let nav = submit_application(&api, JobId(5), Some(ResumeId(2)), "I would love to join.")
        .await
        .expect("submit");

    assert_eq!(nav, Navigation::Applications);
    assert_eq!(
        rec.bodies.lock().await.as_slice(),
        &[json!({"job": 5, "resume": 2, "cover_letter": "I would love to join."})]
    );
}

#[tokio::test]
async fn submit_application_requires_resume_before_calling() {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/applications/", post(create_application))
        .with_state(rec.clone());
    let base = spawn_backend(app).await;
    let api = client(&base);

    let err = submit_application(&api, JobId(5), None, "")
        .await
        .expect_err("must fail");
    assert_eq!(err.message, "Please select a resume");
    assert!(rec.bodies.lock().await.is_empty());
}

#[tokio::test]
async fn unsave_removes_only_the_matching_job() {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/saved-jobs/", get(list_saved))
        .route("/api/saved-jobs/:id/", delete(record_delete))
        .with_state(rec.clone());
    let base = spawn_backend(app).await;
    let api = client(&base);

    let mut screen = SavedJobsScreen::new();
    screen.load(&api).await.expect("load");
    screen.unsave(&api, JobId(2)).await.expect("unsave");

    let remaining: Vec<_> = screen.jobs().map(|s| s.job.id).collect();
    assert_eq!(remaining, vec![JobId(1), JobId(3)]);
    assert_eq!(rec.deleted.lock().await.as_slice(), &[12]);
    assert_eq!(screen.saved.error, None);
}

#[tokio::test]
async fn login_persists_token_and_logout_clears_it() {
    let app = Router::new().route("/api/auth/login/", post(login));
    let base = spawn_backend(app).await;
    let api = client(&base);

    let session = api
        .auth()
        .login(&LoginRequest {
            username: "ann".to_string(),
            password: "secret".to_string(),
        })
        .await
        .expect("login");
    assert_eq!(session.token, "tok-123");

    let stored = api.session().await.expect("session").expect("stored");
    assert_eq!(stored.token, "tok-123");
    assert_eq!(stored.username.as_deref(), Some("ann"));

    api.auth().logout().await.expect("logout");
    assert_eq!(api.session().await.expect("session"), None);
}

#[tokio::test]
async fn rejected_login_reports_detail_and_stores_nothing() {
    let app = Router::new().route("/api/auth/login/", post(login));
    let base = spawn_backend(app).await;
    let api = client(&base);

    let err = api
        .auth()
        .login(&LoginRequest {
            username: "ann".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .expect_err("must fail");

    assert!(err.is_unauthorized());
    assert_eq!(
        err.backend_message(),
        Some("No active account found with the given credentials")
    );
    assert_eq!(api.session().await.expect("session"), None);
}

#[tokio::test]
async fn job_details_fetches_job_and_resumes_and_selects_job() {
    let app = Router::new()
        .route("/api/jobs/:id/", get(retrieve_job))
        .route("/api/resumes/", get(list_resumes));
    let base = spawn_backend(app).await;
    let api = client(&base);
    let store = Store::new();

    let details = load_job_details(&api, &store, JobId(4)).await.expect("details");
    assert_eq!(details.job.id, JobId(4));
    assert_eq!(details.resumes.len(), 2);
    assert_eq!(
        store
            .read(|s| s.jobs.selected_job().map(|j| j.id))
            .await,
        Some(JobId(4))
    );
}

#[tokio::test]
async fn resume_analysis_fails_as_a_whole() {
    let app = Router::new()
        .route("/api/resumes/:id/", get(retrieve_resume))
        .route("/api/resumes/:id/analysis/", get(missing_analysis))
        .route("/api/resumes/:id/feedback/", get(feedback));
    let base = spawn_backend(app).await;
    let api = client(&base);

    let err = load_resume_analysis(&api, ResumeId(2))
        .await
        .expect_err("must fail");
    assert_eq!(err.message, "Not found.");
}

#[tokio::test]
async fn status_change_patches_and_updates_store() {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/applications/", get(list_applications))
        .route("/api/applications/:id/", patch(patch_application))
        .with_state(rec.clone());
    let base = spawn_backend(app).await;
    let api = client(&base);
    let store = Store::new();

    fetch_applications(&api, &store).await.expect("fetch");
    let first = store
        .read(|s| s.applications.applications()[0].clone())
        .await;
    store
        .dispatch(ApplicationsAction::SetSelected(first))
        .await;

    change_status(&api, &store, ApplicationId(31), ApplicationStatus::Shortlisted)
        .await
        .expect("status");

    assert_eq!(
        rec.bodies.lock().await.as_slice(),
        &[json!({"status": "S"})]
    );
    let state = store.snapshot().await;
    let statuses: Vec<_> = state
        .applications
        .applications()
        .iter()
        .map(|a| a.status)
        .collect();
    assert_eq!(
        statuses,
        vec![ApplicationStatus::Shortlisted, ApplicationStatus::Reviewing]
    );
    assert_eq!(
        state.applications.selected_application().map(|a| a.status),
        Some(ApplicationStatus::Shortlisted)
    );
}

#[tokio::test]
async fn resume_upload_sends_title_and_file_parts() {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/resumes/", post(upload_resume))
        .with_state(rec.clone());
    let base = spawn_backend(app).await;
    let api = client(&base);

    let resume = api
        .resumes()
        .upload_bytes("cv.pdf", b"%PDF-1.4".to_vec(), "Main CV")
        .await
        .expect("upload");
    assert_eq!(resume.id, ResumeId(40));
    assert_eq!(
        rec.uploads.lock().await.as_slice(),
        &[
            ("title".to_string(), None),
            ("file".to_string(), Some("cv.pdf".to_string())),
        ]
    );
}

#[tokio::test]
async fn resume_upload_rejects_unsupported_extension_locally() {
    let api = client("http://127.0.0.1:9/api");
    let err = api
        .resumes()
        .upload_bytes("cv.txt", b"plain".to_vec(), "Main CV")
        .await
        .expect_err("must fail");
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(
        err.display_message("fallback"),
        "Unsupported resume format: cv.txt (use .pdf or .docx)"
    );
}

#[test]
fn base_url_is_validated_and_trailing_slash_trimmed() {
    let api = client("http://localhost:8000/api/");
    assert_eq!(api.base_url(), "http://localhost:8000/api");

    let err = ApiClient::new("not a url", Arc::new(MemoryTokenStore::new()))
        .err()
        .expect("must fail");
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[tokio::test]
async fn search_sends_only_set_fields_and_stores_result() {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/jobs/search/", post(search))
        .with_state(rec.clone());
    let base = spawn_backend(app).await;
    let api = client(&base);
    let store = Store::new();

    let query = JobSearch {
        title: Some("rust".to_string()),
        job_type: Some(JobType::FullTime),
        salary_min: Some(1000.0),
        ..JobSearch::default()
    };
    search_jobs(&api, &store, &query).await.expect("search");

    assert_eq!(
        rec.bodies.lock().await.as_slice(),
        &[json!({"title": "rust", "job_type": "FT", "salary_min": 1000.0})]
    );
    let state = store.snapshot().await;
    assert!(!state.jobs.list.loading);
    let ids: Vec<_> = state.jobs.jobs().iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![JobId(7)]);
}

#[tokio::test]
async fn rejected_search_keeps_previous_items() {
    let app = Router::new().route("/api/jobs/search/", post(rejected_search));
    let base = spawn_backend(app).await;
    let api = client(&base);
    let store = Store::new();
    store
        .dispatch(JobsAction::FetchSuccess(vec![serde_json::from_value(
            job_json(3, "Listed before"),
        )
        .expect("job")]))
        .await;

    let err = search_jobs(&api, &store, &JobSearch::default())
        .await
        .expect_err("must fail");
    assert_eq!(err.message, "salary_min: A valid number is required.");

    let state = store.snapshot().await;
    assert!(!state.jobs.list.loading);
    assert_eq!(state.jobs.list.error.as_deref(), Some(err.message.as_str()));
    let ids: Vec<_> = state.jobs.jobs().iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![JobId(3)]);
}

fn saved_backend(rec: &Recorded) -> Router {
    Router::new()
        .route("/api/saved-jobs/", get(list_saved).post(save_job))
        .route("/api/saved-jobs/:id/", delete(record_delete))
        .with_state(rec.clone())
}

#[tokio::test]
async fn toggle_off_deletes_saved_entry_not_job_id() {
    let rec = Recorded::default();
    let base = spawn_backend(saved_backend(&rec)).await;
    let api = client(&base);

    let now_saved = toggle_saved(&api, JobId(2), true).await.expect("toggle");

    assert!(!now_saved);
    assert_eq!(rec.deleted.lock().await.as_slice(), &[12]);
    assert!(rec.bodies.lock().await.is_empty());
}

#[tokio::test]
async fn toggle_on_posts_only_the_job_id() {
    let rec = Recorded::default();
    let base = spawn_backend(saved_backend(&rec)).await;
    let api = client(&base);

    let now_saved = toggle_saved(&api, JobId(5), false).await.expect("toggle");

    assert!(now_saved);
    assert_eq!(rec.bodies.lock().await.as_slice(), &[json!({"job": 5})]);
    assert!(rec.deleted.lock().await.is_empty());
}

#[tokio::test]
async fn toggle_off_for_unsaved_job_reports_it() {
    let rec = Recorded::default();
    let base = spawn_backend(saved_backend(&rec)).await;
    let api = client(&base);

    let err = toggle_saved(&api, JobId(99), true)
        .await
        .expect_err("must fail");

    assert_eq!(err.message, "Job 99 is not in your saved jobs");
    assert!(rec.deleted.lock().await.is_empty());
}

#[tokio::test]
async fn is_saved_checks_saved_list() {
    let rec = Recorded::default();
    let base = spawn_backend(saved_backend(&rec)).await;
    let api = client(&base);

    assert!(is_saved(&api, JobId(2)).await.expect("saved"));
    assert!(!is_saved(&api, JobId(99)).await.expect("not saved"));
}

#[tokio::test]
async fn load_application_selects_it() {
    let app = Router::new().route("/api/applications/:id/", get(retrieve_application));
    let base = spawn_backend(app).await;
    let api = client(&base);
    let store = Store::new();

    let application = load_application(&api, &store, ApplicationId(44))
        .await
        .expect("load");

    assert_eq!(application.id, ApplicationId(44));
    assert_eq!(
        store
            .read(|s| s.applications.selected_application().map(|a| (a.id, a.status)))
            .await,
        Some((ApplicationId(44), ApplicationStatus::Reviewing))
    );
}

#[tokio::test]
async fn job_create_update_delete_hit_their_endpoints() {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/jobs/", post(create_job))
        .route("/api/jobs/:id/", patch(patch_job).delete(record_delete))
        .with_state(rec.clone());
    let base = spawn_backend(app).await;
    let api = client_with_token(&base, "recruiter-token");

    let created = api
        .jobs()
        .create(&NewJob {
            title: "Platform Engineer".to_string(),
            description: "Run the platform".to_string(),
            requirements: String::new(),
            location: "Berlin".to_string(),
            salary_min: Some(70000.0),
            salary_max: None,
            job_type: JobType::Contract,
            experience_level: ExperienceLevel::Senior,
            skills_required: vec!["rust".to_string()],
            is_active: true,
        })
        .await
        .expect("create");
    assert_eq!(created.id, JobId(20));
    assert_eq!(created.title, "Platform Engineer");

    let updated = api
        .jobs()
        .update(
            JobId(20),
            &JobPatch {
                title: Some("Staff Platform Engineer".to_string()),
                ..JobPatch::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.title, "Staff Platform Engineer");

    api.jobs().delete(JobId(20)).await.expect("delete");

    let bodies = rec.bodies.lock().await;
    assert_eq!(bodies[0]["job_type"], "CT");
    assert_eq!(bodies[0]["experience_level"], "SR");
    assert_eq!(bodies[0]["skills_required"], json!(["rust"]));
    assert_eq!(bodies[1], json!({"title": "Staff Platform Engineer"}));
    assert_eq!(rec.deleted.lock().await.as_slice(), &[20]);
}

#[tokio::test]
async fn resume_list_and_delete_hit_their_endpoints() {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/api/resumes/", get(list_resumes))
        .route("/api/resumes/:id/", delete(record_delete))
        .with_state(rec.clone());
    let base = spawn_backend(app).await;
    let api = client(&base);

    let resumes = api.resumes().list().await.expect("list");
    let ids: Vec<_> = resumes.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![ResumeId(2), ResumeId(3)]);

    api.resumes().delete(ResumeId(3)).await.expect("delete");
    assert_eq!(rec.deleted.lock().await.as_slice(), &[3]);
}

#[tokio::test]
async fn rejected_credentials_mark_screen_as_needing_login() {
    let app = Router::new().route("/api/applications/", get(unauthenticated));
    let base = spawn_backend(app).await;
    let api = client_with_token(&base, "expired");
    let store = Store::new();

    let err = fetch_applications(&api, &store).await.expect_err("must fail");

    assert!(err.needs_login);
    assert_eq!(err.message, "Authentication credentials were not provided.");
}

#[tokio::test]
async fn other_failures_do_not_ask_for_login() {
    let app = Router::new().route("/api/applications/", get(failing_with_message));
    let base = spawn_backend(app).await;
    let api = client(&base);

    let err = fetch_applications(&api, &Store::new())
        .await
        .expect_err("must fail");
    assert!(!err.needs_login);
}

#[test]
fn malformed_content_type_is_a_local_validation_error() {
    let err = crate::resources::file_part("cv.pdf", b"%PDF".to_vec(), "not a mime")
        .err()
        .expect("must fail");
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(err.status(), None);
    assert!(err
        .display_message("fallback")
        .starts_with("Invalid content type 'not a mime' for cv.pdf"));
}
