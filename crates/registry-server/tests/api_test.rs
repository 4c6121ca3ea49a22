//! Router tests for the HTTP binding, backed by in-memory storage.
//!
//! Requests are sent with `tower::ServiceExt::oneshot` against the real
//! axum `Router`.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use registry_server::{api, in_memory_service, setup_app_state};
use serde_json::{Value, json};
use tower::ServiceExt;

fn build_router() -> Router {
    api::create_router(setup_app_state(in_memory_service()))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn add_ann(router: &Router) -> String {
    let (status, body) = send(
        router,
        Method::POST,
        "/users",
        Some(json!({"user": {
            "name": "Ann",
            "email": "ann@example.com",
            "password": "longenough",
            "region": "R1"
        }})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"err": null}));

    let (_, body) = send(router, Method::GET, "/users", None).await;
    body["users"][0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_created_user_is_listed_without_password() {
    let router = build_router();
    add_ann(&router).await;

    let (status, body) = send(&router, Method::GET, "/users", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "Ann");
    assert_eq!(users[0]["region"], "R1");
    assert_eq!(users[0]["group"], 3);
    assert!(users[0].get("password").is_none());
    assert!(!users[0]["id"].as_str().unwrap().is_empty());
    assert!(body["err"].is_null());
}

#[tokio::test]
async fn test_get_missing_user_is_404() {
    let router = build_router();

    let (status, body) = send(&router, Method::GET, "/users/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "user not found"}));
}

#[tokio::test]
async fn test_add_user_validation_errors() {
    let router = build_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/users",
        Some(json!({"user": {"name": "Bob", "email": "bob@example.com", "password": "short", "region": "R1"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password length is short");

    let (status, body) = send(
        &router,
        Method::POST,
        "/users",
        Some(json!({"user": {"name": "Bob", "email": "not-an-email", "password": "longenough"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid email format");

    let (status, body) = send(&router, Method::POST, "/users", Some(json!({"user": {"name": "Bob"}}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad request body, make sure all details are there");

    let (_, body) = send(&router, Method::GET, "/users", None).await;
    assert!(body["users"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let router = build_router();
    add_ann(&router).await;

    let (status, _) = send(
        &router,
        Method::POST,
        "/users",
        Some(json!({"user": {"name": "Ann", "email": "ann@example.com", "password": "longenough"}})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_user_ignores_out_of_range_group() {
    let router = build_router();
    let id = add_ann(&router).await;

    let (status, body) = send(
        &router,
        Method::PATCH,
        &format!("/users/{}", id),
        Some(json!({"id": "someone-else", "user": {"region": "R2", "group": 7}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["r0"]["id"], id.as_str());
    assert_eq!(body["r0"]["region"], "R2");
    assert_eq!(body["r0"]["group"], 3);
    assert!(body["e1"].is_null());

    let (_, body) = send(
        &router,
        Method::PATCH,
        &format!("/users/{}", id),
        Some(json!({"user": {"group": 1}})),
    )
    .await;
    assert_eq!(body["r0"]["region"], "R2");
    assert_eq!(body["r0"]["group"], 1);
}

#[tokio::test]
async fn test_auth_user_checks_password() {
    let router = build_router();
    let id = add_ann(&router).await;

    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/auth/{}", id),
        Some(json!({"password": "longenough"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"err": null}));

    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/auth/{}", id),
        Some(json!({"id": "ignored", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");

    let (status, _) = send(&router, Method::GET, "/auth/ghost", Some(json!({"password": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_node_lifecycle() {
    let router = build_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/nodes",
        Some(json!({"node": {
            "addr": "00:1A:2B:3C:4D:5E",
            "name": "gateway",
            "type": 1,
            "region": "R1",
            "latitude": "-6.8",
            "longitude": "39.2"
        }})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["err"].is_null());

    let (_, body) = send(&router, Method::GET, "/nodes", None).await;
    let nodes = body["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["type"], 1);
    let uuid = nodes[0]["uuid"].as_str().unwrap().to_string();

    let (status, body) = send(&router, Method::GET, &format!("/nodes/{}", uuid), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["node"]["name"], "gateway");
    assert_eq!(body["node"]["latitude"], "-6.8");

    let (status, body) = send(
        &router,
        Method::PATCH,
        &format!("/nodes/{}", uuid),
        Some(json!({"user": {"name": "renamed", "type": 3}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["r0"]["name"], "renamed");
    assert_eq!(body["r0"]["type"], 3);
    assert_eq!(body["r0"]["addr"], "00:1A:2B:3C:4D:5E");

    let (status, _) = send(&router, Method::DELETE, &format!("/nodes/{}", uuid), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, Method::DELETE, &format!("/nodes/{}", uuid), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "node not found"}));
}

#[tokio::test]
async fn test_add_node_rejects_bad_input() {
    let router = build_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/nodes",
        Some(json!({"node": {"addr": "zz:zz", "name": "n", "type": 1}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid mac address");

    let (status, body) = send(
        &router,
        Method::POST,
        "/nodes",
        Some(json!({"node": {"addr": "00:1A:2B:3C:4D:5E", "name": "n", "type": 9}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid node type");
}

#[tokio::test]
async fn test_regions() {
    let router = build_router();

    let region = json!({"region": {"id": "R1", "name": "Coast", "desc": "coastal belt"}});
    let (status, _) = send(&router, Method::POST, "/regions", Some(region.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&router, Method::POST, "/regions", Some(region)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&router, Method::GET, "/regions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["regions"],
        json!([{"id": "R1", "name": "Coast", "desc": "coastal belt"}])
    );
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/users")
                .body(Body::from("{\"user\": "))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_user_is_404() {
    let router = build_router();

    let (status, body) = send(
        &router,
        Method::PATCH,
        "/users/ghost",
        Some(json!({"user": {"region": "R2"}})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "user not found"}));

    let (status, body) = send(&router, Method::PATCH, "/users/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "user not found"}));
}

#[tokio::test]
async fn test_unknown_route_carries_error_envelope() {
    let router = build_router();

    let (status, body) = send(&router, Method::GET, "/users/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "no route for GET /users/"}));

    let (status, body) = send(&router, Method::DELETE, "/nodes/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_wrong_method_carries_error_envelope() {
    let router = build_router();

    let (status, body) = send(&router, Method::PUT, "/users", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"error": "method PUT not allowed on /users"}));

    let (status, body) = send(&router, Method::DELETE, "/regions", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body["error"].is_string());
}
