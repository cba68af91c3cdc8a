//! Login, logout, restore and typed endpoints against a mock API.

use std::sync::Arc;

use futures_util::StreamExt;
use serde_json::json;
use taskmaster_client::{ClientConfig, SessionManager};
use taskmaster_core::models::{ProjectFilter, Task, TaskStatus, TaskUpdate};
use taskmaster_core::{ApiUrl, AuthPhase, ErrorKind, KeyValueStore, LoginDetails, Registration};
use taskmaster_store::MemoryStore;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}/api", server.address().port())).unwrap()
}

fn manager(server: &MockServer, store: &MemoryStore) -> SessionManager {
    SessionManager::new(ClientConfig::new(api_url(server)), Arc::new(store.clone())).unwrap()
}

fn auth_body(token: &str, refresh_token: &str) -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "avatar": "https://example.com/ada.png",
            "token": token,
            "refreshToken": refresh_token
        }
    })
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("T1", "R1")))
        .mount(server)
        .await;
}

async fn logged_in(server: &MockServer) -> (SessionManager, MemoryStore) {
    mount_login(server).await;
    let store = MemoryStore::new();
    let manager = manager(server, &store);
    manager
        .login(LoginDetails::new("ada@example.com", "secret"))
        .await
        .unwrap();
    (manager, store)
}

fn task_json(status: &str) -> serde_json::Value {
    json!({"_id": "t1", "title": "Write docs", "status": status, "priority": "high"})
}

// ============================================================================
// Login and registration
// ============================================================================

#[tokio::test]
async fn test_login_persists_then_establishes() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let store = MemoryStore::new();
    let manager = manager(&server, &store);
    assert_eq!(manager.status().phase, AuthPhase::Pending);

    let user = manager
        .login(LoginDetails::new("ada@example.com", "secret"))
        .await
        .unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.role, "user");
    assert_eq!(user.avatar.as_deref(), Some("https://example.com/ada.png"));
    assert!(manager.is_authenticated());
    assert_eq!(manager.current_user(), Some(user));

    assert_eq!(store.get("taskmaster_auth_token").await.unwrap().as_deref(), Some("T1"));
    assert_eq!(
        store.get("taskmaster_auth_refresh_token").await.unwrap().as_deref(),
        Some("R1")
    );
    assert!(store.get("taskmaster_auth_user").await.unwrap().is_some());
}

#[tokio::test]
async fn test_login_rejected_leaves_state_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let manager = manager(&server, &store);

    let err = manager
        .login(LoginDetails::new("ada@example.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
    assert!(err.to_string().contains("Invalid credentials"));
    assert_eq!(manager.status().phase, AuthPhase::Pending);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_login_unreachable_is_network_error() {
    let store = MemoryStore::new();
    let manager = SessionManager::new(
        ClientConfig::new(ApiUrl::new("http://127.0.0.1:9/api").unwrap()),
        Arc::new(store.clone()),
    )
    .unwrap();

    let err = manager
        .login(LoginDetails::new("ada@example.com", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn test_register_signs_in() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_body("T1", "R1")))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let manager = manager(&server, &store);
    let user = manager
        .register(Registration::new("Ada", "ada@example.com", "secret"))
        .await
        .unwrap();

    assert_eq!(user.name, "Ada");
    assert!(manager.is_authenticated());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "User already exists"
        })))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let manager = manager(&server, &store);
    let err = manager
        .register(Registration::new("Ada", "ada@example.com", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
    assert!(err.to_string().contains("User already exists"));
}

#[tokio::test]
async fn test_forgot_password() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/forgot-password"))
        .and(body_json(json!({"email": "ada@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Password reset email sent"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    manager(&server, &store)
        .forgot_password("ada@example.com")
        .await
        .unwrap();
}

// ============================================================================
// Restore and logout
// ============================================================================

#[tokio::test]
async fn test_restore_uses_persisted_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"_id": "u1", "name": "Ada L.", "email": "ada@example.com", "role": "admin"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_first, store) = logged_in(&server).await;

    let second = manager(&server, &store);
    assert!(second.restore().await);
    assert_eq!(second.current_user().unwrap().name, "Ada");

    let profile = second.fetch_profile().await.unwrap();
    assert_eq!(profile.name, "Ada L.");
    assert!(profile.is_admin());
    // Fetching does not touch the session's cached profile.
    assert_eq!(second.current_user().unwrap().name, "Ada");
}

#[tokio::test]
async fn test_restore_without_session_is_unauthenticated() {
    let server = MockServer::start().await;
    let store = MemoryStore::new();
    let manager = manager(&server, &store);

    assert!(!manager.restore().await);
    assert_eq!(manager.status().phase, AuthPhase::Unauthenticated);
}

#[tokio::test]
async fn test_restore_discards_unreadable_session() {
    let server = MockServer::start().await;
    let store = MemoryStore::new();
    store.set("taskmaster_auth_token", "T1").await.unwrap();
    store.set("taskmaster_auth_refresh_token", "R1").await.unwrap();
    store.set("taskmaster_auth_user", "{not json").await.unwrap();

    let manager = manager(&server, &store);

    assert!(!manager.restore().await);
    assert_eq!(manager.status().phase, AuthPhase::Unauthenticated);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_restore_discards_partial_session() {
    let server = MockServer::start().await;
    let store = MemoryStore::new();
    store.set("taskmaster_auth_token", "T1").await.unwrap();

    let manager = manager(&server, &store);

    assert!(!manager.restore().await);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let (manager, store) = logged_in(&server).await;
    manager.logout().await.unwrap();

    assert_eq!(manager.status().phase, AuthPhase::Unauthenticated);
    assert!(manager.current_user().is_none());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_logout_survives_server_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (manager, store) = logged_in(&server).await;
    manager.logout().await.unwrap();

    assert!(!manager.is_authenticated());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_status_stream_follows_transitions() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let manager = manager(&server, &store);
    let mut changes = Box::pin(manager.changes());

    manager
        .login(LoginDetails::new("ada@example.com", "secret"))
        .await
        .unwrap();
    let status = changes.next().await.unwrap();
    assert!(status.is_authenticated());
    assert_eq!(status.current_user().unwrap().email, "ada@example.com");

    manager.logout().await.unwrap();
    assert_eq!(changes.next().await.unwrap().phase, AuthPhase::Unauthenticated);
}

// ============================================================================
// Typed endpoints
// ============================================================================

#[tokio::test]
async fn test_project_filter_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .and(query_param("status", "planning,active,on_hold"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "count": 2,
            "data": [
                {"_id": "p1", "name": "Launch", "status": "active"},
                {"_id": "p2", "name": "Roadmap", "status": "planning"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (manager, _store) = logged_in(&server).await;
    let projects = manager.list_projects(ProjectFilter::Ongoing).await.unwrap();

    assert_eq!(projects.len(), 2);
}

#[tokio::test]
async fn test_task_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/p1/tasks"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [task_json("todo")]
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/tasks/t1"))
        .and(body_json(json!({"status": "completed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": task_json("completed")
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/tasks/t1"))
        .and(body_json(json!({"title": "Write better docs"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"_id": "t1", "title": "Write better docs", "status": "completed"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/tasks/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let (manager, _store) = logged_in(&server).await;

    let tasks = manager.project_tasks("p1").await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].status, TaskStatus::Todo);

    let toggled: Task = manager.toggle_task_completion(&tasks[0]).await.unwrap();
    assert_eq!(toggled.status, TaskStatus::Completed);

    let update = TaskUpdate {
        title: Some("Write better docs".to_string()),
        ..Default::default()
    };
    let renamed = manager.update_task("t1", &update).await.unwrap();
    assert_eq!(renamed.title, "Write better docs");

    manager.delete_task("t1").await.unwrap();
}

#[tokio::test]
async fn test_invalid_task_id_is_rejected_locally() {
    let server = MockServer::start().await;
    let (manager, _store) = logged_in(&server).await;

    let err = manager.get_task("../auth/me").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);

    // Dot segments would be normalized away and hit the API root.
    for id in ["..", "."] {
        let err = manager.delete_task(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);
    }
    assert!(
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .all(|r| r.method.as_str() != "DELETE")
    );
}
