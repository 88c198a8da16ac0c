#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::audit_logs::AuditLogListQuery,
    models::{
        audit_log::{AuditAction, AuditLogResponse},
        job::{CreateJobPayload, Job, JobCategory, JobPriority, UpdateJobPayload},
        PaginatedResponse, PaginationQuery,
    },
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_jobs_doc,
        get_job_doc,
        create_job_doc,
        update_job_doc,
        delete_job_doc,
        list_audit_logs_doc
    ),
    components(schemas(
        Job,
        CreateJobPayload,
        UpdateJobPayload,
        JobPriority,
        JobCategory,
        AuditAction,
        AuditLogResponse,
        PaginatedResponse<AuditLogResponse>
    )),
    tags(
        (name = "Jobs", description = "Job tracking"),
        (name = "Audit", description = "Read-only audit trail")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/api/job",
    responses((status = 200, description = "Active jobs, pending first, newest first", body = [Job])),
    tag = "Jobs"
)]
fn list_jobs_doc() {}

#[utoipa::path(
    get,
    path = "/api/job/{id}",
    params(("id" = i64, Path, description = "Job id")),
    responses(
        (status = 200, description = "The job", body = Job),
        (status = 404, description = "No active job with this id")
    ),
    tag = "Jobs"
)]
fn get_job_doc() {}

#[utoipa::path(
    post,
    path = "/api/job",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created; Location points at it", body = Job),
        (status = 400, description = "Validation failed")
    ),
    tag = "Jobs"
)]
fn create_job_doc() {}

#[utoipa::path(
    put,
    path = "/api/job/{id}",
    params(("id" = i64, Path, description = "Job id")),
    request_body = UpdateJobPayload,
    responses(
        (status = 204, description = "Job updated"),
        (status = 400, description = "Validation failed or path/body id mismatch"),
        (status = 404, description = "No job with this id")
    ),
    tag = "Jobs"
)]
fn update_job_doc() {}

#[utoipa::path(
    delete,
    path = "/api/job/{id}",
    params(("id" = i64, Path, description = "Job id")),
    responses(
        (status = 204, description = "Job soft-deleted"),
        (status = 404, description = "No job with this id")
    ),
    tag = "Jobs"
)]
fn delete_job_doc() {}

#[utoipa::path(
    get,
    path = "/api/audit-logs",
    params(AuditLogListQuery, PaginationQuery),
    responses((status = 200, description = "Audit rows, newest first", body = PaginatedResponse<AuditLogResponse>)),
    tag = "Audit"
)]
fn list_audit_logs_doc() {}
