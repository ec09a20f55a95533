// src/core/mod.rs
//! Storage services shared by the web layer

pub mod database;

pub use database::{Database, JobRepository};
