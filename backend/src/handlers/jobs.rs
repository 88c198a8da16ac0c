//! HTTP surface for job records: thin verb-to-repository mapping.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::job::{CreateJobPayload, Job, UpdateJobPayload},
    repositories::JobRepository,
    types::JobId,
};

pub async fn list_jobs(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = JobRepository::new().list_active(&pool).await?;
    Ok(Json(jobs))
}

pub async fn get_job(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<JobId>,
) -> Result<Json<Job>, AppError> {
    let job = JobRepository::new().find_by_id(&pool, id).await?;
    Ok(Json(job))
}

pub async fn create_job(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Job>), AppError> {
    payload.validate()?;

    let job = JobRepository::new().create(&pool, &payload).await?;
    let location = format!("/api/job/{}", job.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(job)))
}

pub async fn update_job(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<JobId>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;
    if payload.id != id {
        return Err(AppError::BadRequest(
            "Job id in the path does not match the request body".into(),
        ));
    }

    let repo = JobRepository::new();
    match repo.update(&pool, id, &payload).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(AppError::Conflict(message)) => {
            // A row deleted out from under us reads as plain NotFound.
            repo.find_by_id(&pool, id).await?;
            Err(AppError::Conflict(message))
        }
        Err(other) => Err(other),
    }
}

pub async fn delete_job(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<JobId>,
) -> Result<StatusCode, AppError> {
    let deleted = JobRepository::new().delete(&pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Job not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
