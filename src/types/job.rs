// src/types/job.rs
//! Job record model: the create payload, its validation and the stored form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{JobError, JobResult};

/// Employment arrangement of a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time (On-site)")]
    FullTimeOnSite,
    #[serde(rename = "Part-time (On-site)")]
    PartTimeOnSite,
    #[serde(rename = "Full-time (Remote)")]
    FullTimeRemote,
    #[serde(rename = "Part-time (Remote)")]
    PartTimeRemote,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTimeOnSite,
        JobType::PartTimeOnSite,
        JobType::FullTimeRemote,
        JobType::PartTimeRemote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTimeOnSite => "Full-time (On-site)",
            JobType::PartTimeOnSite => "Part-time (On-site)",
            JobType::FullTimeRemote => "Full-time (Remote)",
            JobType::PartTimeRemote => "Part-time (Remote)",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = JobError;

    fn from_str(label: &str) -> JobResult<Self> {
        JobType::ALL
            .into_iter()
            .find(|job_type| job_type.as_str() == label)
            .ok_or_else(|| {
                let allowed: Vec<&str> = JobType::ALL.iter().map(JobType::as_str).collect();
                JobError::validation(format!(
                    "jobType '{}' is not one of: {}",
                    label,
                    allowed.join(", ")
                ))
            })
    }
}

/// Opaque identifier assigned to a job when it is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a client-supplied identifier
    pub fn parse(raw: &str) -> JobResult<Self> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| JobError::InvalidIdentifier(raw.to_string()))
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Salary as clients send it: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SalaryInput {
    Amount(f64),
    Text(String),
}

impl SalaryInput {
    /// Zero and the empty string count as no salary given
    fn is_empty(&self) -> bool {
        match self {
            SalaryInput::Amount(amount) => *amount == 0.0,
            SalaryInput::Text(text) => text.is_empty(),
        }
    }

    pub fn to_amount(&self) -> JobResult<f64> {
        let amount = match self {
            SalaryInput::Amount(amount) => *amount,
            SalaryInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| JobError::validation(format!("salary '{}' is not a number", text)))?,
        };

        if !amount.is_finite() {
            return Err(JobError::validation("salary must be a finite number"));
        }
        Ok(amount)
    }
}

/// Qualifications as clients send them: a list, or one newline-separated string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QualificationsInput {
    Lines(Vec<String>),
    Text(String),
}

impl QualificationsInput {
    fn is_empty(&self) -> bool {
        matches!(self, QualificationsInput::Text(text) if text.is_empty())
    }
}

pub fn normalize_qualifications(input: QualificationsInput) -> Vec<String> {
    match input {
        QualificationsInput::Lines(lines) => lines,
        QualificationsInput::Text(text) => text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Raw create payload. Every field is optional so that absent ones can be reported together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<SalaryInput>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub job_qualifications: Option<QualificationsInput>,
}

impl JobDraft {
    pub const REQUIRED_FIELDS: [&'static str; 7] = [
        "jobTitle",
        "company",
        "location",
        "salary",
        "jobType",
        "description",
        "jobQualifications",
    ];

    /// Names of required fields that are absent, null, an empty string or a zero salary,
    /// in declaration order. Whitespace-only text counts as present, and so does an
    /// empty qualification list.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            is_present(&self.job_title),
            is_present(&self.company),
            is_present(&self.location),
            self.salary.as_ref().is_some_and(|s| !s.is_empty()),
            is_present(&self.job_type),
            is_present(&self.description),
            self.job_qualifications
                .as_ref()
                .is_some_and(|q| !q.is_empty()),
        ];

        Self::REQUIRED_FIELDS
            .into_iter()
            .zip(present)
            .filter_map(|(field, present)| (!present).then_some(field))
            .collect()
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// A validated job, ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub salary: f64,
    pub job_type: JobType,
    pub description: String,
    pub job_qualifications: Vec<String>,
}

impl TryFrom<JobDraft> for NewJob {
    type Error = JobError;

    fn try_from(draft: JobDraft) -> JobResult<Self> {
        let missing = draft.missing_fields();
        let (
            true,
            Some(job_title),
            Some(company),
            Some(location),
            Some(salary),
            Some(job_type),
            Some(description),
            Some(job_qualifications),
        ) = (
            missing.is_empty(),
            draft.job_title,
            draft.company,
            draft.location,
            draft.salary,
            draft.job_type,
            draft.description,
            draft.job_qualifications,
        )
        else {
            return Err(JobError::MissingFields(missing));
        };

        Ok(Self {
            job_title,
            company,
            location,
            salary: salary.to_amount()?,
            job_type: job_type.parse()?,
            description,
            job_qualifications: normalize_qualifications(job_qualifications),
        })
    }
}

/// A job as stored and returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: JobId,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub salary: f64,
    pub job_type: JobType,
    pub description: String,
    pub job_qualifications: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Stamp a validated job with a fresh id and creation time
    pub fn from_new(new_job: NewJob, now: DateTime<Utc>) -> Self {
        Self {
            id: JobId::new(),
            job_title: new_job.job_title,
            company: new_job.company,
            location: new_job.location,
            salary: new_job.salary,
            job_type: new_job.job_type,
            description: new_job.description,
            job_qualifications: new_job.job_qualifications,
            created_at: now,
            updated_at: now,
        }
    }
}
