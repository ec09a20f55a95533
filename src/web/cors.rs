// src/web/cors.rs
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, Response};
use std::sync::Arc;
use tracing::warn;

/// Origins a browser may call the API from
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Arc<Vec<String>>,
}

impl CorsPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: Arc::new(origins.into_iter().map(Into::into).collect()),
        }
    }

    /// Requests without an Origin header are not cross-origin and always pass
    pub fn allows(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed_origins.iter().any(|allowed| allowed == origin),
        }
    }
}

/// Request guard that rejects disallowed origins before a handler runs
#[derive(Debug)]
pub struct AllowedOrigin(pub Option<String>);

#[derive(Debug)]
pub enum CorsError {
    NotAllowed(String),
    PolicyMissing,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AllowedOrigin {
    type Error = CorsError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(policy) = req.rocket().state::<CorsPolicy>() else {
            return Outcome::Error((Status::InternalServerError, CorsError::PolicyMissing));
        };

        let origin = req.headers().get_one("Origin");
        if policy.allows(origin) {
            Outcome::Success(AllowedOrigin(origin.map(str::to_string)))
        } else {
            let origin = origin.unwrap_or_default().to_string();
            warn!("Rejected request from origin {}", origin);
            Outcome::Error((Status::Forbidden, CorsError::NotAllowed(origin)))
        }
    }
}

// CORS Fairing
pub struct Cors {
    policy: CorsPolicy,
}

impl Cors {
    pub fn new(policy: CorsPolicy) -> Self {
        Self { policy }
    }
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let Some(origin) = request.headers().get_one("Origin") else {
            return;
        };
        if !self.policy.allows(Some(origin)) {
            return;
        }

        response.set_header(Header::new("Access-Control-Allow-Origin", origin.to_string()));
        response.set_header(Header::new("Vary", "Origin"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

/// Answers browser preflight requests from allowed origins
#[rocket::options("/<_..>")]
pub async fn preflight(_origin: AllowedOrigin) -> Status {
    Status::NoContent
}
