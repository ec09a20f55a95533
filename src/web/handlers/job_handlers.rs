// src/web/handlers/job_handlers.rs

use crate::core::{Database, JobRepository};
use crate::error::JobError;
use crate::types::{Job, JobDraft, JobId, NewJob};
use crate::web::types::{
    ApiError, ApiResult, DataResponse, ErrorResponse, JobsQuery, ListResponse, MessageResponse,
};

use rocket::http::Status;
use rocket::serde::json::{json, Json};
use tracing::{error, info, warn};

const MISSING_FIELDS_MESSAGE: &str = "Missing required fields (jobTitle, company, location, \
                                      salary, jobType, description, jobQualifications)";

pub async fn create_job_handler(
    draft: JobDraft,
    db: &Database,
) -> ApiResult<MessageResponse<Job>> {
    let new_job = NewJob::try_from(draft).map_err(rejected_job)?;

    info!(
        "Creating job: {} at {} ({})",
        new_job.job_title, new_job.company, new_job.job_type
    );

    match JobRepository::new(db.pool()).create(new_job).await {
        Ok(job) => Ok((
            Status::Created,
            Json(MessageResponse::new("Job created successfully", job)),
        )),
        Err(e) => {
            error!("Error creating job: {}", e);
            error!("Full error details: {:?}", e);
            let details = json!(format!("{:?}", e));
            Err(ApiError::internal(
                ErrorResponse::new("Failed to create job")
                    .with_error(e)
                    .with_details(details),
            ))
        }
    }
}

pub async fn list_jobs_handler(query: JobsQuery, db: &Database) -> ApiResult<ListResponse<Job>> {
    info!("Fetching all jobs (search: {:?})", query.title_filter());

    match JobRepository::new(db.pool())
        .find_all(query.title_filter())
        .await
    {
        Ok(jobs) => {
            info!("Found {} jobs", jobs.len());
            Ok((Status::Ok, Json(ListResponse::new(jobs))))
        }
        Err(e) => {
            error!("Error fetching jobs: {}", e);
            Err(ApiError::internal(
                ErrorResponse::new("Server Error: Unable to fetch jobs").with_error(e),
            ))
        }
    }
}

pub async fn get_job_handler(id: &str, db: &Database) -> ApiResult<DataResponse<Job>> {
    let id = parse_job_id(id)?;

    match JobRepository::new(db.pool()).find_by_id(&id).await {
        Ok(Some(job)) => Ok((Status::Ok, Json(DataResponse::new(job)))),
        Ok(None) => Err(job_not_found(&id)),
        Err(e) => {
            error!("Error fetching job details for {}: {}", id, e);
            Err(ApiError::internal(
                ErrorResponse::new("Server Error: Unable to fetch job details").with_error(e),
            ))
        }
    }
}

pub async fn delete_job_handler(id: &str, db: &Database) -> ApiResult<MessageResponse<Job>> {
    let id = parse_job_id(id)?;

    match JobRepository::new(db.pool()).delete_by_id(&id).await {
        Ok(Some(job)) => Ok((
            Status::Ok,
            Json(MessageResponse::new("Job deleted successfully", job)),
        )),
        Ok(None) => Err(job_not_found(&id)),
        Err(e) => {
            error!("Error deleting job {}: {}", id, e);
            Err(ApiError::internal(
                ErrorResponse::new("Server Error: Unable to delete job").with_error(e),
            ))
        }
    }
}

fn parse_job_id(raw: &str) -> Result<JobId, ApiError> {
    JobId::parse(raw).map_err(|_| {
        warn!("Invalid job ID format: {}", raw);
        ApiError::bad_request(ErrorResponse::new("Invalid job ID format"))
    })
}

fn job_not_found(id: &JobId) -> ApiError {
    info!("Job not found: {}", id);
    ApiError::not_found(ErrorResponse::new("Job not found"))
}

fn rejected_job(err: JobError) -> ApiError {
    match err {
        JobError::MissingFields(fields) => {
            warn!("Rejected job, missing fields: {}", fields.join(", "));
            ApiError::bad_request(
                ErrorResponse::new(MISSING_FIELDS_MESSAGE).with_missing_fields(&fields),
            )
        }
        JobError::Validation(_) | JobError::InvalidIdentifier(_) => {
            warn!("Rejected job: {}", err);
            ApiError::bad_request(ErrorResponse::new("Invalid job data").with_error(err))
        }
        JobError::Persistence(_) => {
            error!("Error validating job: {}", err);
            ApiError::internal(ErrorResponse::new("Failed to create job").with_error(err))
        }
    }
}
