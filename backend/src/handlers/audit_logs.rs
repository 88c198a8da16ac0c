//! Read-only listing of the audit trail.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::IntoParams;

use crate::{
    config::Config,
    error::AppError,
    models::audit_log::AuditLogResponse,
    models::{PaginatedResponse, PaginationQuery},
    repositories::audit_log::{self, AuditLogFilters},
};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogListQuery {
    /// Restrict to one entity kind, e.g. `Job`.
    pub entity_name: Option<String>,
    /// Restrict to one audited row.
    pub entity_id: Option<i64>,
}

pub async fn list_audit_logs(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(filters): Query<AuditLogListQuery>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<AuditLogResponse>>, AppError> {
    let repo_filters = AuditLogFilters {
        entity_name: filters.entity_name,
        entity_id: filters.entity_id,
    };

    let (items, total) =
        audit_log::list_audit_logs(&pool, &repo_filters, page.limit(), page.offset()).await?;

    let data = items.into_iter().map(AuditLogResponse::from).collect();
    Ok(Json(PaginatedResponse::new(
        data,
        total,
        page.limit(),
        page.offset(),
    )))
}
