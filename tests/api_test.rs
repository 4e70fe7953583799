//! Integration tests for the HTTP API.
//!
//! The full router runs against the in-memory repositories; requests are
//! driven through `tower::ServiceExt::oneshot`, no socket involved.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use staff_api::application::RegisterUser;
use staff_api::infrastructure::crypto::JwtConfig;
use staff_api::{create_api_router, AppState, RepositoryProvider};

// =============================================================================
// Helpers
// =============================================================================

async fn app() -> Router {
    let state = AppState::new(RepositoryProvider::in_memory(), JwtConfig::default(), None);
    state
        .users
        .seed_admin(RegisterUser {
            username: "admin".into(),
            email: "admin@example.com".into(),
            password: "Admin@123".into(),
            full_name: "Administrator".into(),
            role: None,
        })
        .await
        .unwrap();
    create_api_router(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["data"]["token"].as_str().unwrap().to_string()
}

/// Admin creates an account with the given role and returns its token.
async fn token_for_role(app: &Router, admin: &str, username: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/register",
        Some(admin),
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "Senha@123",
            "full_name": "Test Account",
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["user"]["role"], role);
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn create_department(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/departments",
        Some(token),
        Some(json!({"name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_i64().unwrap()
}

fn employee_body(department_id: i64) -> Value {
    json!({
        "full_name": "Ana Souza",
        "cpf": "529.982.247-25",
        "email": "Ana@Empresa.com",
        "position": "Developer",
        "salary": 8500.5,
        "hire_date": "2023-03-01",
        "department_id": department_id,
    })
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_login_and_profile() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "joao",
            "email": "joao@x.com",
            "password": "Senha@123",
            "full_name": "João Silva",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["role"], "viewer");
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let token = login(&app, "joao", "Senha@123").await;

    let (status, body) = send(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "joao");
    assert!(body["data"]["last_login_at"].is_string());

    let (status, body) =
        send(&app, Method::GET, "/api/v1/auth/validate", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["role"], "viewer");
}

#[tokio::test]
async fn test_duplicate_registration_and_bad_login_are_400() {
    let app = app().await;
    let register = json!({
        "username": "joao",
        "email": "joao@x.com",
        "password": "Senha@123",
        "full_name": "João Silva",
    });

    let (status, _) = send(&app, Method::POST, "/api/v1/auth/register", None, Some(register.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/v1/auth/register", None, Some(register)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body.get("data").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({"username": "joao", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_self_registration_cannot_pick_a_role() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "mallory",
            "email": "mallory@x.com",
            "password": "Senha@123",
            "full_name": "Mallory",
            "role": "admin",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["role"], "viewer");
}

#[tokio::test]
async fn test_blank_names_are_400() {
    let app = app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "    ",
            "email": "blank@x.com",
            "password": "Senha@123",
            "full_name": "   ",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({"username": "  ", "password": "Senha@123"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let admin = login(&app, "admin", "Admin@123").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/departments",
        Some(&admin),
        Some(json!({"name": "     "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let dept = create_department(&app, &admin, "Engineering").await;
    let mut body = employee_body(dept);
    body["position"] = json!("    ");
    let (status, _) = send(&app, Method::POST, "/api/v1/employees", Some(&admin), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_change_password() {
    let app = app().await;
    let admin = login(&app, "admin", "Admin@123").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/auth/change-password",
        Some(&admin),
        Some(json!({"current_password": "Admin@123", "new_password": "Outra@4567"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    login(&app, "admin", "Outra@4567").await;
}

#[tokio::test]
async fn test_missing_or_invalid_token_is_401() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/departments", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::GET, "/api/v1/departments", Some("not.a.jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/v1/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Authorization
// =============================================================================

#[tokio::test]
async fn test_viewer_reads_but_cannot_write() {
    let app = app().await;
    let admin = login(&app, "admin", "Admin@123").await;
    let viewer = token_for_role(&app, &admin, "vera", "viewer").await;
    let employee = token_for_role(&app, &admin, "edu", "employee").await;

    for token in [&viewer, &employee] {
        let (status, _) = send(&app, Method::GET, "/api/v1/departments", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/departments",
            Some(token),
            Some(json!({"name": "Finance"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn test_manager_cannot_delete_but_admin_can() {
    let app = app().await;
    let admin = login(&app, "admin", "Admin@123").await;
    let manager = token_for_role(&app, &admin, "marta", "manager").await;

    let id = create_department(&app, &manager, "Finance").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/departments/{}", id),
        Some(&manager),
        Some(json!({"name": "Finance & Accounting", "description": "Books"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Finance & Accounting");

    let uri = format!("/api/v1/departments/{}", id);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&manager), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_admin_endpoints_are_admin_only() {
    let app = app().await;
    let admin = login(&app, "admin", "Admin@123").await;
    let manager = token_for_role(&app, &admin, "marta", "manager").await;

    let (status, _) = send(&app, Method::GET, "/api/v1/users", Some(&manager), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::GET, "/api/v1/users?page_size=1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["total_pages"], 2);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/users/2",
        Some(&admin),
        Some(json!({"is_active": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({"username": "marta", "password": "Senha@123"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Account is inactive");

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/v1/users/2",
        Some(&admin),
        Some(json!({"role": "overlord"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Departments & employees
// =============================================================================

#[tokio::test]
async fn test_employee_lifecycle() {
    let app = app().await;
    let admin = login(&app, "admin", "Admin@123").await;
    let dept = create_department(&app, &admin, "Engineering").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/employees",
        Some(&admin),
        Some(employee_body(dept)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["cpf"], "529.982.247-25");
    assert_eq!(body["data"]["email"], "ana@empresa.com");
    assert_eq!(body["data"]["salary"], 8500.5);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/employees",
        Some(&admin),
        Some(employee_body(dept)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v2/employees/{}", id),
        Some(&admin),
        Some(json!({"position": "Tech Lead"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["position"], "Tech Lead");
    assert_eq!(body["data"]["full_name"], "Ana Souza");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v2/departments/{}/employees", dept),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    // A staffed department cannot be removed
    let dept_uri = format!("/api/v1/departments/{}", dept);
    let (status, _) = send(&app, Method::DELETE, &dept_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/employees/{}", id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &dept_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_invalid_employee_input_is_400() {
    let app = app().await;
    let admin = login(&app, "admin", "Admin@123").await;
    let dept = create_department(&app, &admin, "Engineering").await;

    let mut bad_cpf = employee_body(dept);
    bad_cpf["cpf"] = json!("111.111.111-11");
    let (status, body) = send(&app, Method::POST, "/api/v1/employees", Some(&admin), Some(bad_cpf)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let mut no_dept = employee_body(dept + 10);
    no_dept["cpf"] = json!("123.456.789-09");
    let (status, _) = send(&app, Method::POST, "/api/v1/employees", Some(&admin), Some(no_dept)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/employees")
        .header(header::AUTHORIZATION, format!("Bearer {}", admin))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_v2_pagination_is_clamped() {
    let app = app().await;
    let admin = login(&app, "admin", "Admin@123").await;
    for name in ["Engineering", "Finance", "Legal"] {
        create_department(&app, &admin, name).await;
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v2/departments?page=2&page_size=2",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["items"][0]["name"], "Legal");

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v2/departments?page=0&page_size=1000",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["page_size"], 100);

    let (_, body) = send(&app, Method::GET, "/api/v1/departments", Some(&admin), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_v2_page_beyond_range_is_empty_not_500() {
    let app = app().await;
    let admin = login(&app, "admin", "Admin@123").await;
    create_department(&app, &admin, "Engineering").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v2/departments?page=18446744073709551615&page_size=100",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["total"], 1);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}

// =============================================================================
// Plumbing
// =============================================================================

#[tokio::test]
async fn test_health_and_request_id() {
    let app = app().await;

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "trace-me");

    let (_, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(body["data"]["database"]["status"], "in-memory");
}

#[tokio::test]
async fn test_unknown_route_is_404_not_401() {
    let app = app().await;
    let (status, _) = send(&app, Method::GET, "/api/v1/nothing-here", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
