use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use servicetracker_backend::{
    models::job::{CreateJobPayload, JobCategory, JobPriority, UpdateJobPayload, DEFAULT_STATUS},
    repositories::JobRepository,
};

mod support;
use support::app;

async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

/// Creates two jobs, completes the first and soft-deletes the second,
/// producing four audit rows. Returns the two job ids.
async fn seed_activity(pool: &PgPool) -> (i64, i64) {
    let repo = JobRepository::new();

    let first = repo
        .create(
            pool,
            &CreateJobPayload {
                title: "Oil Change".to_string(),
                client_name: "Acme Co".to_string(),
                status: DEFAULT_STATUS.to_string(),
                priority: JobPriority::default(),
                category: JobCategory::default(),
            },
        )
        .await
        .expect("create first job");

    let second = repo
        .create(
            pool,
            &CreateJobPayload {
                title: "Brake check".to_string(),
                client_name: "Globex".to_string(),
                status: DEFAULT_STATUS.to_string(),
                priority: JobPriority::High,
                category: JobCategory::Inspection,
            },
        )
        .await
        .expect("create second job");

    let payload = UpdateJobPayload {
        id: first.id,
        title: first.title.clone(),
        client_name: first.client_name.clone(),
        status: "Completed".to_string(),
        priority: first.priority,
        category: first.category,
    };
    repo.update(pool, first.id, &payload)
        .await
        .expect("update first job");

    assert!(repo.delete(pool, second.id).await.expect("delete second job"));

    (first.id.as_i64(), second.id.as_i64())
}

#[sqlx::test(migrations = "./migrations")]
async fn listing_returns_all_rows_newest_first(pool: PgPool) {
    seed_activity(&pool).await;

    let response = app(pool)
        .oneshot(get_request("/api/audit-logs"))
        .await
        .expect("send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["total"], 4);
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 4);

    let ids: Vec<i64> = data
        .iter()
        .map(|row| row["id"].as_i64().expect("row id"))
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);
}

#[sqlx::test(migrations = "./migrations")]
async fn listing_filters_by_entity_id(pool: PgPool) {
    let (first_id, _) = seed_activity(&pool).await;

    let body = response_json(
        app(pool)
            .oneshot(get_request(&format!(
                "/api/audit-logs?entityName=Job&entityId={first_id}"
            )))
            .await
            .expect("send request"),
    )
    .await;

    assert_eq!(body["total"], 2);
    let data = body["data"].as_array().expect("data array");
    assert!(data.iter().all(|row| row["entityId"] == first_id));
    assert_eq!(data[0]["action"], "Updated");
    assert_eq!(data[1]["action"], "Created");
}

#[sqlx::test(migrations = "./migrations")]
async fn listing_paginates_with_limit_and_offset(pool: PgPool) {
    seed_activity(&pool).await;

    let body = response_json(
        app(pool)
            .oneshot(get_request("/api/audit-logs?limit=2&offset=1"))
            .await
            .expect("send request"),
    )
    .await;

    assert_eq!(body["total"], 4);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["offset"], 1);
    assert_eq!(body["data"].as_array().expect("data array").len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn listing_with_unknown_entity_is_empty(pool: PgPool) {
    seed_activity(&pool).await;

    let body = response_json(
        app(pool)
            .oneshot(get_request("/api/audit-logs?entityName=Invoice"))
            .await
            .expect("send request"),
    )
    .await;

    assert_eq!(body["total"], 0);
    assert!(body["data"].as_array().expect("data array").is_empty());
}
