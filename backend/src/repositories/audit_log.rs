//! Persistence for audit trail rows.
//!
//! Inserts go through an open transaction so they share the fate of the
//! data change they describe; reads serve the read-only listing endpoint.

use sqlx::postgres::PgTransaction;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::audit_log::{AuditLog, NewAuditLog};
use crate::repositories::common::push_clause;

const SELECT_COLUMNS: &str =
    "id, entity_name, entity_id, action, \"timestamp\", user_id, old_values, new_values, changes";

/// Filters for audit trail queries.
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilters {
    pub entity_name: Option<String>,
    pub entity_id: Option<i64>,
}

/// Stages an audit row on an open transaction.
pub async fn insert_audit_log(
    tx: &mut PgTransaction<'_>,
    log: &NewAuditLog,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_logs \
         (entity_name, entity_id, action, \"timestamp\", user_id, old_values, new_values, changes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(&log.entity_name)
    .bind(log.entity_id)
    .bind(log.action)
    .bind(log.timestamp)
    .bind(&log.user_id)
    .bind(log.old_values.as_ref().map(sqlx::types::Json))
    .bind(log.new_values.as_ref().map(sqlx::types::Json))
    .bind(&log.changes)
    .execute(tx.as_mut())
    .await
    .map(|_| ())
}

/// Lists audit rows newest first, with the total count for pagination.
pub async fn list_audit_logs(
    pool: &PgPool,
    filters: &AuditLogFilters,
    limit: i64,
    offset: i64,
) -> Result<(Vec<AuditLog>, i64), sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {} FROM audit_logs", SELECT_COLUMNS));
    let mut has_clause = false;
    apply_audit_log_filters(&mut builder, &mut has_clause, filters);
    builder.push(" ORDER BY \"timestamp\" DESC, id DESC");
    builder
        .push(" LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let items = builder.build_query_as::<AuditLog>().fetch_all(pool).await?;

    let mut count_builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM audit_logs");
    let mut count_has_clause = false;
    apply_audit_log_filters(&mut count_builder, &mut count_has_clause, filters);
    let total = count_builder
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await?;

    Ok((items, total))
}

fn apply_audit_log_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    has_clause: &mut bool,
    filters: &AuditLogFilters,
) {
    if let Some(entity_name) = filters.entity_name.as_ref() {
        push_clause(builder, has_clause);
        builder
            .push("entity_name = ")
            .push_bind(entity_name.to_owned());
    }
    if let Some(entity_id) = filters.entity_id {
        push_clause(builder, has_clause);
        builder.push("entity_id = ").push_bind(entity_id);
    }
}
