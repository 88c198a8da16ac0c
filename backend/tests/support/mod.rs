#![allow(dead_code)]

use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use servicetracker_backend::{
    config::Config,
    handlers,
    models::{audit_log::AuditLog, job::Job},
};
use sqlx::PgPool;

const JOB_COLUMNS: &str =
    "id, title, client_name, status, priority, category, created_at, updated_at, is_deleted";

/// Configuration stand-in for handler state; no server is started.
pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost:5432/servicetracker_test".to_string(),
        frontend_origin: "http://localhost:5173".to_string(),
        bind_addr: "127.0.0.1:0".parse().expect("bind addr"),
    }
}

/// Router with the full job + audit API wired to the given pool.
pub fn app(pool: PgPool) -> Router {
    Router::new()
        .route(
            "/api/job",
            get(handlers::jobs::list_jobs).post(handlers::jobs::create_job),
        )
        .route(
            "/api/job/{id}",
            get(handlers::jobs::get_job)
                .put(handlers::jobs::update_job)
                .delete(handlers::jobs::delete_job),
        )
        .route(
            "/api/audit-logs",
            get(handlers::audit_logs::list_audit_logs),
        )
        .with_state((pool, test_config()))
}

/// Inserts a job row directly, bypassing the repository and its auditing.
pub async fn seed_job(
    pool: &PgPool,
    title: &str,
    status: &str,
    created_at: DateTime<Utc>,
    is_deleted: bool,
) -> Job {
    let query = format!(
        "INSERT INTO jobs (title, client_name, status, created_at, is_deleted) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        JOB_COLUMNS
    );
    sqlx::query_as::<_, Job>(&query)
        .bind(title)
        .bind("Acme Co")
        .bind(status)
        .bind(created_at)
        .bind(is_deleted)
        .fetch_one(pool)
        .await
        .expect("seed job")
}

/// Reads a job row back regardless of its soft-delete state.
pub async fn fetch_job_row(pool: &PgPool, id: i64) -> Job {
    let query = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
    sqlx::query_as::<_, Job>(&query)
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("fetch job row")
}

/// Audit rows for one entity, oldest first.
pub async fn audit_rows_for(pool: &PgPool, entity_id: i64) -> Vec<AuditLog> {
    sqlx::query_as::<_, AuditLog>(
        "SELECT id, entity_name, entity_id, action, \"timestamp\", user_id, old_values, \
         new_values, changes \
         FROM audit_logs WHERE entity_id = $1 ORDER BY id",
    )
    .bind(entity_id)
    .fetch_all(pool)
    .await
    .expect("fetch audit rows")
}

pub async fn count_audit_rows(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs")
        .fetch_one(pool)
        .await
        .expect("count audit rows")
}
