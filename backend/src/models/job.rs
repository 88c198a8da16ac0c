//! Job records and their request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::text_enum;
use crate::services::audit::{Audited, FieldChange};
use crate::types::JobId;
use crate::validation::rules;

/// Urgency of a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum JobPriority {
    Low,
    #[default]
    Medium,
    High,
}

text_enum!(JobPriority {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});

/// Kind of service work a job represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum JobCategory {
    Repair,
    #[default]
    Maintenance,
    Inspection,
}

text_enum!(JobCategory {
    Repair => "Repair",
    Maintenance => "Maintenance",
    Inspection => "Inspection",
});

/// Status assigned to jobs that have not been worked on yet. The field is
/// free-form text; "Pending" and "Completed" are the conventional values.
pub const DEFAULT_STATUS: &str = "Pending";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// A unit of service work tracked for a client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub client_name: String,
    pub status: String,
    pub priority: JobPriority,
    pub category: JobCategory,
    /// Set once at creation, never mutated afterwards.
    pub created_at: DateTime<Utc>,
    /// Null until the first mutation, refreshed on every one after that.
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft-delete marker; flagged rows stay in storage for the audit trail.
    pub is_deleted: bool,
}

/// Body of `POST /api/job`. Server-managed fields supplied by the caller
/// (id, timestamps, the soft-delete flag) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = rules::validate_not_blank)
    )]
    pub title: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "Client name must be 1-100 characters"),
        custom(function = rules::validate_not_blank)
    )]
    pub client_name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub priority: JobPriority,
    #[serde(default)]
    pub category: JobCategory,
}

/// Body of `PUT /api/job/{id}`: the full record, whose id must match the
/// path. `created_at` and `is_deleted` cannot be overwritten through this
/// payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    /// Defaults to 0 when omitted, which can never match a real path id.
    #[serde(default)]
    pub id: JobId,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = rules::validate_not_blank)
    )]
    pub title: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "Client name must be 1-100 characters"),
        custom(function = rules::validate_not_blank)
    )]
    pub client_name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub priority: JobPriority,
    #[serde(default)]
    pub category: JobCategory,
}

impl Audited for Job {
    const ENTITY_NAME: &'static str = "Job";

    fn entity_id(&self) -> i64 {
        self.id.as_i64()
    }

    fn snapshot(&self) -> Value {
        json!({
            "Id": self.id.as_i64(),
            "Title": self.title,
            "ClientName": self.client_name,
            "Status": self.status,
            "Priority": self.priority.as_str(),
            "Category": self.category.as_str(),
            "CreatedAt": self.created_at,
            "UpdatedAt": self.updated_at,
            "IsDeleted": self.is_deleted,
        })
    }

    fn diff(&self, after: &Self) -> Vec<FieldChange> {
        let mut changes = Vec::new();
        let mut push = |field: &'static str, old: Value, new: Value| {
            if old != new {
                changes.push(FieldChange::new(field, old, new));
            }
        };

        push("Id", json!(self.id.as_i64()), json!(after.id.as_i64()));
        push("Title", json!(self.title), json!(after.title));
        push(
            "ClientName",
            json!(self.client_name),
            json!(after.client_name),
        );
        push("Status", json!(self.status), json!(after.status));
        push(
            "Priority",
            json!(self.priority.as_str()),
            json!(after.priority.as_str()),
        );
        push(
            "Category",
            json!(self.category.as_str()),
            json!(after.category.as_str()),
        );
        push("CreatedAt", json!(self.created_at), json!(after.created_at));
        push("UpdatedAt", json!(self.updated_at), json!(after.updated_at));
        push("IsDeleted", json!(self.is_deleted), json!(after.is_deleted));

        changes
    }
}
