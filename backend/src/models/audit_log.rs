//! Audit trail rows describing committed entity mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;

use crate::models::text_enum;
use crate::types::AuditLogId;

/// What happened to the audited entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

text_enum!(AuditAction {
    Created => "Created",
    Updated => "Updated",
    Deleted => "Deleted",
});

/// A persisted audit row. Immutable once written; the audit trail itself is
/// never audited.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLog {
    pub id: AuditLogId,
    pub entity_name: String,
    /// Primary key of the audited row, 0 when it could not be resolved.
    pub entity_id: i64,
    pub action: AuditAction,
    pub timestamp: DateTime<Utc>,
    /// Actor identifier; unpopulated until an auth context is wired in.
    pub user_id: Option<String>,
    pub old_values: Option<Json<Value>>,
    pub new_values: Option<Json<Value>>,
    /// Human-readable summary, e.g. `Status: 'Pending' -> 'Completed'`.
    pub changes: Option<String>,
}

/// An audit row about to be written; the id is assigned on insert.
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub entity_name: String,
    pub entity_id: i64,
    pub action: AuditAction,
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<String>,
    pub old_values: Option<Value>,
    pub new_values: Option<Value>,
    pub changes: Option<String>,
}

/// Wire representation of an audit row for the read-only listing endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogResponse {
    pub id: AuditLogId,
    pub entity_name: String,
    pub entity_id: i64,
    pub action: AuditAction,
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<String>,
    pub old_values: Option<Value>,
    pub new_values: Option<Value>,
    pub changes: Option<String>,
}

impl From<AuditLog> for AuditLogResponse {
    fn from(value: AuditLog) -> Self {
        Self {
            id: value.id,
            entity_name: value.entity_name,
            entity_id: value.entity_id,
            action: value.action,
            timestamp: value.timestamp,
            user_id: value.user_id,
            old_values: value.old_values.map(|v| v.0),
            new_values: value.new_values.map(|v| v.0),
            changes: value.changes,
        }
    }
}
