// src/core/database.rs
//! Job store: connection lifecycle and the job repository

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{JobError, JobResult};
use crate::types::{Job, JobId, NewJob};

// ===== Core Database Connection Management =====

#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the store at `database_url` and make sure the jobs table exists
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true);

        // An in-memory database lives only as long as its connection
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;

        info!("Database connection established: {}", database_url);

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id TEXT PRIMARY KEY NOT NULL,
                job_title TEXT NOT NULL,
                company TEXT NOT NULL,
                location TEXT NOT NULL,
                salary REAL NOT NULL,
                job_type TEXT NOT NULL,
                description TEXT NOT NULL,
                job_qualifications TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create jobs table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_created_at ON jobs(created_at);")
            .execute(&self.pool)
            .await
            .context("Failed to create jobs index")?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

// ===== Job Rows =====

#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: String,
    job_title: String,
    company: String,
    location: String,
    salary: f64,
    job_type: String,
    description: String,
    job_qualifications: Json<Vec<String>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = JobError;

    fn try_from(row: JobRow) -> JobResult<Self> {
        Ok(Job {
            id: JobId::parse(&row.id).map_err(corrupt_row)?,
            job_title: row.job_title,
            company: row.company,
            location: row.location,
            salary: row.salary,
            job_type: row.job_type.parse().map_err(corrupt_row)?,
            description: row.description,
            job_qualifications: row.job_qualifications.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A stored row that no longer parses is a store failure, not a client one
fn corrupt_row(err: JobError) -> JobError {
    JobError::Persistence(sqlx::Error::Decode(Box::new(err)))
}

const JOB_COLUMNS: &str = "id, job_title, company, location, salary, job_type, description, \
                           job_qualifications, created_at, updated_at";

/// Escape LIKE wildcards so the filter matches literally
fn like_pattern(filter: &str) -> String {
    let escaped = filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

// ===== Job Repository =====

pub struct JobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> JobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a validated job, assigning its id and timestamps
    pub async fn create(&self, new_job: NewJob) -> JobResult<Job> {
        let job = Job::from_new(new_job, Utc::now());

        sqlx::query(
            r#"
            INSERT INTO jobs (id, job_title, company, location, salary, job_type, description,
                              job_qualifications, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(job.id.to_string())
        .bind(&job.job_title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.salary)
        .bind(job.job_type.as_str())
        .bind(&job.description)
        .bind(Json(&job.job_qualifications))
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(self.pool)
        .await?;

        info!("Created job {} ({} at {})", job.id, job.job_title, job.company);
        Ok(job)
    }

    /// Jobs whose title contains `title_filter` (ASCII case-insensitive), newest first
    pub async fn find_all(&self, title_filter: &str) -> JobResult<Vec<Job>> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE job_title LIKE ? ESCAPE '\'
            ORDER BY created_at DESC, rowid DESC
            "#
        ))
        .bind(like_pattern(title_filter))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Job::try_from).collect()
    }

    pub async fn find_by_id(&self, id: &JobId) -> JobResult<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(Job::try_from).transpose()
    }

    /// Remove a job and return what was removed
    pub async fn delete_by_id(&self, id: &JobId) -> JobResult<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "DELETE FROM jobs WHERE id = ? RETURNING {JOB_COLUMNS}"
        ))
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await?;

        if row.is_some() {
            info!("Deleted job {}", id);
        }
        row.map(Job::try_from).transpose()
    }
}
