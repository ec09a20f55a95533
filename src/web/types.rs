// src/web/types.rs - JSON envelopes and typed request parts

use rocket::form::FromForm;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::{Json, Value};
use rocket::serde::{Deserialize, Serialize};
use rocket::Request;

/// Query string of the job listing
#[derive(Debug, Default, FromForm)]
pub struct JobsQuery {
    pub search: Option<String>,
}

impl JobsQuery {
    pub fn title_filter(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct MessageResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> MessageResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
            details: None,
            missing_fields: None,
        }
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_missing_fields(mut self, fields: &[&str]) -> Self {
        self.missing_fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }
}

/// An error envelope together with the status it is sent with
#[derive(Debug)]
pub struct ApiError {
    pub status: Status,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: Status, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    pub fn bad_request(body: ErrorResponse) -> Self {
        Self::new(Status::BadRequest, body)
    }

    pub fn not_found(body: ErrorResponse) -> Self {
        Self::new(Status::NotFound, body)
    }

    pub fn internal(body: ErrorResponse) -> Self {
        Self::new(Status::InternalServerError, body)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (self.status, Json(self.body)).respond_to(request)
    }
}

/// Result of a JSON handler: a status and envelope either way
pub type ApiResult<T> = Result<(Status, Json<T>), ApiError>;
