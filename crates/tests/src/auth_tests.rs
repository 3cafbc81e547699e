use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
async fn register_creates_user_and_returns_tokens() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/auth/register"))
        .json(&serde_json::json!({
            "name": "Alice",
            "email": "alice@test.com",
            "password": "Password123!",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 201);

    let json: Value = resp.json().await.unwrap();
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["email"], "alice@test.com");
    assert_eq!(json["user"]["name"], "Alice");
}

#[tokio::test]
async fn first_registered_user_is_the_administrator() {
    let app = TestApp::spawn().await;

    let first = app.register_user("Admin", "admin@test.com", "Password123!").await;
    let second = app.register_user("Bob", "bob@test.com", "Password123!").await;

    assert!(first.is_admin);
    assert!(!second.is_admin);
}

#[tokio::test]
async fn only_one_account_can_hold_the_admin_flag() {
    use mediq_services::dao::{base::DaoError, user::UserDao};

    let app = TestApp::spawn().await;

    app.register_user("Admin", "admin@test.com", "Password123!").await;

    // A second flagged account must be refused at the storage layer,
    // even when it slips past the handler's emptiness check.
    let users = UserDao::new(&app.db);
    let err = users
        .create(
            "Impostor".to_string(),
            "impostor@test.com".to_string(),
            "not-a-real-hash".to_string(),
            true,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DaoError::DuplicateKey(_)));

    // An unflagged account with a fresh email is still fine.
    let regular = users
        .create(
            "Regular".to_string(),
            "regular@test.com".to_string(),
            "not-a-real-hash".to_string(),
            false,
        )
        .await
        .unwrap();
    assert!(!regular.is_admin);
}

#[tokio::test]
async fn register_duplicate_email_fails() {
    let app = TestApp::spawn().await;

    app.register_user("User 1", "dup@test.com", "Password123!").await;

    let resp = app
        .client
        .post(app.url("/api/auth/register"))
        .json(&serde_json::json!({
            "name": "User 2",
            "email": "dup@test.com",
            "password": "Password123!",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409); // Conflict
}

#[tokio::test]
async fn login_with_valid_credentials_succeeds() {
    let app = TestApp::spawn().await;

    app.register_user("Login User", "login@test.com", "Password123!").await;

    let resp = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "login@test.com",
            "password": "Password123!",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["email"], "login@test.com");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::spawn().await;

    app.register_user("Login User", "login2@test.com", "Password123!").await;

    let resp = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "login2@test.com",
            "password": "WrongPassword!",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn me_requires_a_token() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/api/auth/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);

    let user = app.register_user("Carol", "carol@test.com", "Password123!").await;
    let resp = app
        .auth_get("/api/auth/me", &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["email"], "carol@test.com");
}

#[tokio::test]
async fn login_response_never_exposes_password_hash() {
    let app = TestApp::spawn().await;

    app.register_user("Dave", "dave@test.com", "Password123!").await;

    let resp = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "dave@test.com",
            "password": "Password123!",
        }))
        .send()
        .await
        .unwrap();

    let json: Value = resp.json().await.unwrap();
    assert!(json["user"].get("password_hash").is_none());
    assert!(json["user"].get("password").is_none());
}
