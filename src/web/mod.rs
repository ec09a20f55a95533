// src/web/mod.rs

pub mod cors;
pub mod handlers;
pub mod types;

pub use cors::{AllowedOrigin, Cors, CorsPolicy};
pub use types::*;

use crate::core::Database;
use crate::environment::Settings;
use crate::types::{Job, JobDraft};
use anyhow::Result;
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, post, routes, Build, Rocket, State};
use tracing::{error, info};

#[get("/")]
pub async fn index(_origin: AllowedOrigin) -> &'static str {
    handlers::root_handler().await
}

#[post("/jobs", data = "<draft>")]
pub async fn create_job(
    _origin: AllowedOrigin,
    draft: Json<JobDraft>,
    db: &State<Database>,
) -> ApiResult<MessageResponse<Job>> {
    handlers::create_job_handler(draft.into_inner(), db).await
}

#[get("/jobs?<query..>")]
pub async fn list_jobs(
    _origin: AllowedOrigin,
    query: JobsQuery,
    db: &State<Database>,
) -> ApiResult<ListResponse<Job>> {
    handlers::list_jobs_handler(query, db).await
}

#[get("/jobs/<id>")]
pub async fn get_job(
    _origin: AllowedOrigin,
    id: &str,
    db: &State<Database>,
) -> ApiResult<DataResponse<Job>> {
    handlers::get_job_handler(id, db).await
}

#[delete("/jobs/<id>")]
pub async fn delete_job(
    _origin: AllowedOrigin,
    id: &str,
    db: &State<Database>,
) -> ApiResult<MessageResponse<Job>> {
    handlers::delete_job_handler(id, db).await
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Invalid request format").with_error("Request body is not valid JSON"))
}

#[rocket::catch(403)]
pub fn forbidden() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Not allowed by CORS"))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Route not found"))
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Invalid job data").with_error("One or more fields have the wrong type"))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal server error"))
}

/// Assemble the API around an already connected store
pub fn build_rocket(database: Database, cors_policy: CorsPolicy) -> Rocket<Build> {
    rocket::build()
        .attach(Cors::new(cors_policy.clone()))
        .manage(database)
        .manage(cors_policy)
        .register(
            "/",
            catchers![
                bad_request,
                forbidden,
                not_found,
                unprocessable_entity,
                internal_error
            ],
        )
        .mount("/", routes![index, cors::preflight])
        .mount("/api", routes![create_job, list_jobs, get_job, delete_job])
}

// Main server start function
pub async fn start_web_server(settings: Settings) -> Result<()> {
    let database = match Database::connect(&settings.database_url).await {
        Ok(database) => database,
        Err(e) => {
            error!("Database connection failed: {:#}", e);
            return Err(e);
        }
    };

    if let Err(e) = database.health_check().await {
        error!("Database connection failed: {:#}", e);
        return Err(e);
    }
    info!("Database connected successfully");

    let figment = rocket::Config::figment()
        .merge(("port", settings.port))
        .merge(("address", settings.address));

    info!("Server is running on port {}", settings.port);
    info!("Allowed origins: {}", settings.allowed_origins.join(", "));

    build_rocket(database, CorsPolicy::new(settings.allowed_origins))
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
