//! Job repository.
//!
//! Sole gateway for job reads and mutations. Soft-delete filtering, server
//! timestamps, and change auditing are applied here so no caller can bypass
//! them.

use chrono::Utc;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::job::{CreateJobPayload, Job, UpdateJobPayload};
use crate::repositories::transaction::{begin_transaction, commit_transaction};
use crate::services::audit::ChangeAuditor;
use crate::types::JobId;

const TABLE_NAME: &str = "jobs";
const SELECT_COLUMNS: &str =
    "id, title, client_name, status, priority, category, created_at, updated_at, is_deleted";

#[derive(Debug, Default, Clone, Copy)]
pub struct JobRepository {
    auditor: ChangeAuditor,
}

impl JobRepository {
    pub fn new() -> Self {
        Self {
            auditor: ChangeAuditor::new(),
        }
    }

    /// All jobs that are not soft-deleted, pending ones first, newest first
    /// within each status group.
    pub async fn list_active(&self, db: &PgPool) -> Result<Vec<Job>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE is_deleted = FALSE \
             ORDER BY (status = 'Pending') DESC, created_at DESC",
            SELECT_COLUMNS, TABLE_NAME
        );
        let rows = sqlx::query_as::<_, Job>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    /// A single job by id; soft-deleted rows read as absent.
    pub async fn find_by_id(&self, db: &PgPool, id: JobId) -> Result<Job, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1 AND is_deleted = FALSE",
            SELECT_COLUMNS, TABLE_NAME
        );
        let row = sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".into()))?;
        Ok(row)
    }

    /// Inserts a new job. `created_at` comes from the server clock and
    /// `is_deleted` starts false, whatever the caller supplied.
    pub async fn create(&self, db: &PgPool, payload: &CreateJobPayload) -> Result<Job, AppError> {
        let mut tx = begin_transaction(db).await?;

        let query = format!(
            "INSERT INTO {} (title, client_name, status, priority, category) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let job = sqlx::query_as::<_, Job>(&query)
            .bind(&payload.title)
            .bind(&payload.client_name)
            .bind(&payload.status)
            .bind(payload.priority)
            .bind(payload.category)
            .fetch_one(tx.as_mut())
            .await?;

        self.auditor.record_created(&mut tx, &job).await?;
        commit_transaction(tx).await?;

        tracing::debug!(id = %job.id, title = %job.title, "Created job");
        Ok(job)
    }

    /// Replaces the mutable field set of an existing job and refreshes
    /// `updated_at`. The row is looked up regardless of its soft-delete
    /// state; a missing row is NotFound and leaves no trace in the store.
    pub async fn update(
        &self,
        db: &PgPool,
        id: JobId,
        payload: &UpdateJobPayload,
    ) -> Result<Job, AppError> {
        let mut tx = begin_transaction(db).await?;

        let select = format!(
            "SELECT {} FROM {} WHERE id = $1",
            SELECT_COLUMNS, TABLE_NAME
        );
        let before = sqlx::query_as::<_, Job>(&select)
            .bind(id)
            .fetch_optional(tx.as_mut())
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".into()))?;

        let update = format!(
            "UPDATE {} SET title = $2, client_name = $3, status = $4, priority = $5, \
             category = $6, updated_at = $7 \
             WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let after = sqlx::query_as::<_, Job>(&update)
            .bind(id)
            .bind(&payload.title)
            .bind(&payload.client_name)
            .bind(&payload.status)
            .bind(payload.priority)
            .bind(payload.category)
            .bind(Utc::now())
            .fetch_one(tx.as_mut())
            .await?;

        self.auditor.record_updated(&mut tx, &before, &after).await?;
        commit_transaction(tx).await?;

        Ok(after)
    }

    /// Soft-deletes a job: flags the row and refreshes `updated_at`. Returns
    /// false without error when the row does not exist; deleting an
    /// already-flagged row is an idempotent re-flag.
    pub async fn delete(&self, db: &PgPool, id: JobId) -> Result<bool, AppError> {
        let mut tx = begin_transaction(db).await?;

        let select = format!(
            "SELECT {} FROM {} WHERE id = $1",
            SELECT_COLUMNS, TABLE_NAME
        );
        let Some(before) = sqlx::query_as::<_, Job>(&select)
            .bind(id)
            .fetch_optional(tx.as_mut())
            .await?
        else {
            tracing::debug!(%id, "Delete requested for missing job; ignoring");
            return Ok(false);
        };

        let update = format!(
            "UPDATE {} SET is_deleted = TRUE, updated_at = $2 WHERE id = $1",
            TABLE_NAME
        );
        sqlx::query(&update)
            .bind(id)
            .bind(Utc::now())
            .execute(tx.as_mut())
            .await?;

        self.auditor.record_deleted(&mut tx, &before).await?;
        commit_transaction(tx).await?;

        tracing::debug!(%id, "Soft-deleted job");
        Ok(true)
    }
}
