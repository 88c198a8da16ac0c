//! Service-tracker backend: a job tracking CRUD API over PostgreSQL with an
//! automatic field-level audit trail on every mutation.

pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod types;
pub mod validation;
