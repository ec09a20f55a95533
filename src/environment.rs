// src/environment.rs
use clap::Parser;
use std::net::IpAddr;
use tracing::info;

/// Frontends allowed to call the API from a browser
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 5] = [
    "http://localhost:5173",
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:5174",
    "https://full-stack-app-mcr-frontend.vercel.app",
];

#[derive(Debug, Clone, Parser)]
#[command(name = "job-portal", version, about = "Job listing API server")]
pub struct Settings {
    /// Port the HTTP server listens on
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Address the HTTP server binds to
    #[arg(long, env = "ADDRESS", default_value = "0.0.0.0")]
    pub address: IpAddr,

    /// Connection string of the job store
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:jobs.db")]
    pub database_url: String,

    /// Comma-separated list of origins allowed by the CORS policy
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values = DEFAULT_ALLOWED_ORIGINS
    )]
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Read settings from `.env`, the process environment and the command line
    pub fn load() -> Self {
        if dotenv::dotenv().is_ok() {
            info!("Loaded environment from .env");
        }
        Self::parse()
    }
}
