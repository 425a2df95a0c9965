mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use campusdesk::router::init_router;
use common::{admin_token, body_json, test_state};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn college_payload(code: &str) -> serde_json::Value {
    json!({
        "name": "Test College",
        "code": code,
        "description": "A college for tests",
        "email": "admin@college.test",
        "website": "https://college.test",
        "city": "Testville",
        "country": "Testland",
        "established_year": 1995
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_college(pool: PgPool) {
    let app = init_router(test_state(pool));
    let token = admin_token();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/colleges",
            &token,
            college_payload("TC-01"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Test College");
    assert_eq!(body["code"], "TC-01");
    assert_eq!(body["is_active"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_college_duplicate_code(pool: PgPool) {
    let state = test_state(pool);
    let token = admin_token();

    let app = init_router(state.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/colleges",
            &token,
            college_payload("TC-02"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = init_router(state);
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/colleges",
            &token,
            college_payload("TC-02"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "College with this code already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_college_requires_auth(pool: PgPool) {
    let app = init_router(test_state(pool));

    let request = Request::builder()
        .method("POST")
        .uri("/api/admin/colleges")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&college_payload("TC-03")).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Authentication required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_college_rejects_invalid_email(pool: PgPool) {
    let app = init_router(test_state(pool));
    let token = admin_token();

    let mut payload = college_payload("TC-04");
    payload["email"] = json!("not-an-email");

    let response = app
        .oneshot(json_request("POST", "/api/admin/colleges", &token, payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_college_not_found(pool: PgPool) {
    let app = init_router(test_state(pool));
    let token = admin_token();

    let response = app
        .oneshot(get_request("/api/admin/colleges/999", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "College not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_college_partial(pool: PgPool) {
    let state = test_state(pool);
    let token = admin_token();

    let app = init_router(state.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/colleges",
            &token,
            college_payload("TC-05"),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let app = init_router(state);
    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/admin/colleges/{}", id),
            &token,
            json!({ "city": "New City" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["city"], "New City");
    // Untouched fields survive a partial update.
    assert_eq!(body["name"], "Test College");
    assert_eq!(body["code"], "TC-05");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_soft_delete_college(pool: PgPool) {
    let state = test_state(pool);
    let token = admin_token();

    let app = init_router(state.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/colleges",
            &token,
            college_payload("TC-06"),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let app = init_router(state.clone());
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/admin/colleges/{}", id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Admin fetch still sees the inactive row.
    let app = init_router(state.clone());
    let response = app
        .oneshot(get_request(&format!("/api/admin/colleges/{}", id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["is_active"], false);

    // The list only shows active colleges.
    let app = init_router(state.clone());
    let response = app
        .oneshot(get_request("/api/admin/colleges", &token))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(
        body.as_array()
            .unwrap()
            .iter()
            .all(|c| c["id"].as_i64() != Some(id))
    );

    // Deleting again is a 404.
    let app = init_router(state);
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/admin/colleges/{}", id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
