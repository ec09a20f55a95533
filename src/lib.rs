//! Job listing API: create, search, fetch and delete job postings over HTTP.

pub mod core;
pub mod environment;
pub mod error;
pub mod types;
pub mod web;

pub use environment::Settings;
pub use error::{JobError, JobResult};
pub use web::{build_rocket, start_web_server};
