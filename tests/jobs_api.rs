use job_portal::core::Database;
use job_portal::types::{Job, JobType};
use job_portal::web::{
    build_rocket, CorsPolicy, DataResponse, ErrorResponse, ListResponse, MessageResponse,
};
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};

const FRONTEND: &str = "http://localhost:5173";
const ABSENT_ID: &str = "00000000-0000-4000-8000-000000000000";

async fn client_with_database() -> (Client, Database) {
    let database = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    let rocket = build_rocket(database.clone(), CorsPolicy::new([FRONTEND]));
    let client = Client::tracked(rocket).await.expect("valid rocket instance");
    (client, database)
}

async fn client() -> Client {
    client_with_database().await.0
}

/// A client whose store has gone away underneath it
async fn client_with_closed_store() -> Client {
    let (client, database) = client_with_database().await;
    database.pool().close().await;
    client
}

fn job_payload(title: &str) -> Value {
    json!({
        "jobTitle": title,
        "company": "Acme",
        "location": "Berlin",
        "salary": "85000",
        "jobType": "Full-time (Remote)",
        "description": "Build and run services",
        "jobQualifications": "A\nB\n\nC"
    })
}

async fn create(client: &Client, payload: &Value) -> Job {
    let response = client
        .post("/api/jobs")
        .header(ContentType::JSON)
        .body(payload.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);

    let body: MessageResponse<Job> = response.into_json().await.expect("json body");
    assert!(body.success);
    assert_eq!(body.message, "Job created successfully");
    body.data
}

async fn job_count(client: &Client) -> usize {
    let response = client.get("/api/jobs").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: ListResponse<Job> = response.into_json().await.expect("json body");
    assert_eq!(body.count, body.data.len());
    body.count
}

#[rocket::async_test]
async fn test_liveness() {
    let client = client().await;
    let response = client.get("/").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.into_string().await.as_deref(),
        Some("Job Portal Backend is running")
    );
}

#[rocket::async_test]
async fn test_create_job_normalizes_input() {
    let client = client().await;
    let job = create(&client, &job_payload("Backend Engineer")).await;

    assert!(!job.id.to_string().is_empty());
    assert_eq!(job.job_title, "Backend Engineer");
    assert_eq!(job.salary, 85000.0);
    assert_eq!(job.job_type, JobType::FullTimeRemote);
    assert_eq!(job.job_qualifications, vec!["A", "B", "C"]);
    assert_eq!(job.created_at, job.updated_at);
}

#[rocket::async_test]
async fn test_create_job_keeps_qualification_list() {
    let client = client().await;
    let mut payload = job_payload("Backend Engineer");
    payload["jobQualifications"] = json!(["Rust", "Tokio"]);
    payload["salary"] = json!(120000);

    let job = create(&client, &payload).await;
    assert_eq!(job.job_qualifications, vec!["Rust", "Tokio"]);
    assert_eq!(job.salary, 120000.0);
}

#[rocket::async_test]
async fn test_create_job_missing_field_is_rejected() {
    let client = client().await;

    for field in [
        "jobTitle",
        "company",
        "location",
        "salary",
        "jobType",
        "description",
        "jobQualifications",
    ] {
        let mut payload = job_payload("Backend Engineer");
        payload.as_object_mut().unwrap().remove(field);

        let response = client
            .post("/api/jobs")
            .header(ContentType::JSON)
            .body(payload.to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest, "field {}", field);

        let body: ErrorResponse = response.into_json().await.expect("json body");
        assert!(!body.success);
        assert!(body.message.starts_with("Missing required fields"));
        assert_eq!(body.missing_fields, Some(vec![field.to_string()]));
    }

    assert_eq!(job_count(&client).await, 0);
}

#[rocket::async_test]
async fn test_create_job_with_unknown_job_type_is_rejected() {
    let client = client().await;
    let mut payload = job_payload("Backend Engineer");
    payload["jobType"] = json!("Internship");

    let response = client
        .post("/api/jobs")
        .header(ContentType::JSON)
        .body(payload.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let body: ErrorResponse = response.into_json().await.expect("json body");
    assert_eq!(body.message, "Invalid job data");
    assert!(body.error.unwrap_or_default().contains("Internship"));
    assert_eq!(job_count(&client).await, 0);
}

#[rocket::async_test]
async fn test_create_job_with_wrongly_typed_field_is_unprocessable() {
    let client = client().await;
    let mut payload = job_payload("Backend Engineer");
    payload["salary"] = json!(true);

    let response = client
        .post("/api/jobs")
        .header(ContentType::JSON)
        .body(payload.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::UnprocessableEntity);

    let body: ErrorResponse = response.into_json().await.expect("json body");
    assert!(!body.success);
    assert_eq!(body.message, "Invalid job data");
    assert_eq!(job_count(&client).await, 0);
}

#[rocket::async_test]
async fn test_create_job_treats_zero_salary_as_missing() {
    let client = client().await;
    let mut payload = job_payload("Backend Engineer");
    payload["salary"] = json!(0);

    let response = client
        .post("/api/jobs")
        .header(ContentType::JSON)
        .body(payload.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let body: ErrorResponse = response.into_json().await.expect("json body");
    assert_eq!(body.missing_fields, Some(vec!["salary".to_string()]));
    assert_eq!(job_count(&client).await, 0);
}

#[rocket::async_test]
async fn test_create_job_accepts_whitespace_title() {
    let client = client().await;
    let job = create(&client, &job_payload("   ")).await;
    assert_eq!(job.job_title, "   ");
}

#[rocket::async_test]
async fn test_create_job_store_failure() {
    let client = client_with_closed_store().await;
    let response = client
        .post("/api/jobs")
        .header(ContentType::JSON)
        .body(job_payload("Backend Engineer").to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::InternalServerError);

    let body: ErrorResponse = response.into_json().await.expect("json body");
    assert!(!body.success);
    assert_eq!(body.message, "Failed to create job");
    assert!(body.error.is_some());
    assert!(body.details.is_some());
}

#[rocket::async_test]
async fn test_list_jobs_store_failure() {
    let client = client_with_closed_store().await;
    let response = client.get("/api/jobs").dispatch().await;
    assert_eq!(response.status(), Status::InternalServerError);

    let body: ErrorResponse = response.into_json().await.expect("json body");
    assert!(!body.success);
    assert_eq!(body.message, "Server Error: Unable to fetch jobs");
    assert!(body.error.is_some());
}

#[rocket::async_test]
async fn test_get_job_store_failure() {
    let client = client_with_closed_store().await;
    let response = client.get(format!("/api/jobs/{}", ABSENT_ID)).dispatch().await;
    assert_eq!(response.status(), Status::InternalServerError);

    let body: ErrorResponse = response.into_json().await.expect("json body");
    assert_eq!(body.message, "Server Error: Unable to fetch job details");
    assert!(body.error.is_some());
}

#[rocket::async_test]
async fn test_delete_job_store_failure() {
    let client = client_with_closed_store().await;
    let response = client
        .delete(format!("/api/jobs/{}", ABSENT_ID))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::InternalServerError);

    let body: ErrorResponse = response.into_json().await.expect("json body");
    assert_eq!(body.message, "Server Error: Unable to delete job");
    assert!(body.error.is_some());
}

#[rocket::async_test]
async fn test_create_job_with_malformed_json_is_rejected() {
    let client = client().await;
    let response = client
        .post("/api/jobs")
        .header(ContentType::JSON)
        .body("{\"jobTitle\": ")
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(job_count(&client).await, 0);
}

#[rocket::async_test]
async fn test_search_by_title_newest_first() {
    let client = client().await;
    let backend = create(&client, &job_payload("Backend Engineer")).await;
    let frontend = create(&client, &job_payload("Frontend Engineer")).await;

    for search in ["backend", "BACKEND", "BackEnd"] {
        let response = client
            .get(format!("/api/jobs?search={}", search))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let body: ListResponse<Job> = response.into_json().await.expect("json body");
        assert!(body.success);
        assert_eq!(body.count, 1);
        assert_eq!(body.data[0].id, backend.id);
    }

    for uri in ["/api/jobs?search=", "/api/jobs"] {
        let response = client.get(uri).dispatch().await;
        let body: ListResponse<Job> = response.into_json().await.expect("json body");
        let ids: Vec<_> = body.data.iter().map(|job| job.id).collect();
        assert_eq!(ids, vec![frontend.id, backend.id]);
    }
}

#[rocket::async_test]
async fn test_get_job_by_id() {
    let client = client().await;
    let job = create(&client, &job_payload("Backend Engineer")).await;

    let response = client.get("/api/jobs/abc").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: ErrorResponse = response.into_json().await.expect("json body");
    assert_eq!(body.message, "Invalid job ID format");

    let response = client.get(format!("/api/jobs/{}", ABSENT_ID)).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let body: ErrorResponse = response.into_json().await.expect("json body");
    assert_eq!(body.message, "Job not found");

    let response = client.get(format!("/api/jobs/{}", job.id)).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: DataResponse<Job> = response.into_json().await.expect("json body");
    assert!(body.success);
    assert_eq!(body.data, job);
}

#[rocket::async_test]
async fn test_delete_job_by_id() {
    let client = client().await;
    let job = create(&client, &job_payload("Backend Engineer")).await;

    let response = client.delete("/api/jobs/abc").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);

    let uri = format!("/api/jobs/{}", job.id);
    let response = client.delete(uri.clone()).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: MessageResponse<Job> = response.into_json().await.expect("json body");
    assert_eq!(body.message, "Job deleted successfully");
    assert_eq!(body.data.id, job.id);

    let response = client.get(uri.clone()).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);

    let response = client.delete(uri).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(job_count(&client).await, 0);
}

#[rocket::async_test]
async fn test_allowed_origin_is_echoed() {
    let client = client().await;
    let response = client
        .get("/api/jobs")
        .header(Header::new("Origin", FRONTEND))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some(FRONTEND)
    );
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Credentials"),
        Some("true")
    );
}

#[rocket::async_test]
async fn test_disallowed_origin_is_rejected_before_handler() {
    let client = client().await;
    let response = client
        .post("/api/jobs")
        .header(ContentType::JSON)
        .header(Header::new("Origin", "https://evil.example"))
        .body(job_payload("Backend Engineer").to_string())
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Forbidden);
    assert!(response
        .headers()
        .get_one("Access-Control-Allow-Origin")
        .is_none());
    let body: ErrorResponse = response.into_json().await.expect("json body");
    assert_eq!(body.message, "Not allowed by CORS");

    assert_eq!(job_count(&client).await, 0);
}

#[rocket::async_test]
async fn test_preflight_from_allowed_origin() {
    let client = client().await;
    let response = client
        .options("/api/jobs")
        .header(Header::new("Origin", FRONTEND))
        .header(Header::new("Access-Control-Request-Method", "POST"))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::NoContent);
    assert!(response
        .headers()
        .get_one("Access-Control-Allow-Methods")
        .is_some_and(|methods| methods.contains("DELETE")));
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Headers"),
        Some("Content-Type")
    );
}
