mod common;
use common::{read_json, session_cookie, set_cookie_header, TestApp};
use obdscribe::domain::models::{shop::Shop, user::User};
use serde_json::json;

#[tokio::test]
async fn test_signup_then_login_issues_session_cookie() {
    let app = TestApp::new().await;

    let response = app.signup("owner@garage.test", "hunter22-secure").await;
    assert_eq!(response.status(), 201);
    let body = read_json(response).await;
    assert_eq!(body["user"]["email"], "owner@garage.test");
    assert_eq!(body["shop"]["name"], "owner's Shop");
    assert!(body["user"].get("passwordHash").is_none());

    let response = app.request("POST", "/auth/login", None, Some(json!({
        "email": "owner@garage.test",
        "password": "hunter22-secure",
    }))).await;
    assert_eq!(response.status(), 200);

    let raw_cookie = set_cookie_header(&response);
    assert!(raw_cookie.contains("HttpOnly"));
    assert!(raw_cookie.contains("SameSite=Lax"));
    assert!(raw_cookie.contains("Path=/"));
    assert!(!raw_cookie.contains("Secure"));

    let cookie = session_cookie(&response).unwrap();
    let response = app.request("GET", "/settings/user", Some(&cookie), None).await;
    assert_eq!(response.status(), 200);
    assert_eq!(read_json(response).await["email"], "owner@garage.test");
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let app = TestApp::new().await;

    assert_eq!(app.signup("dup@garage.test", "hunter22-secure").await.status(), 201);
    assert_eq!(app.signup("dup@garage.test", "another-password").await.status(), 409);
    assert_eq!(app.signup("  DUP@Garage.test ", "another-password").await.status(), 409);
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::new().await;

    assert_eq!(app.signup("not-an-email", "hunter22-secure").await.status(), 400);
    assert_eq!(app.signup("tech@garage.test", "short").await.status(), 400);

    let response = app.request("POST", "/auth/signup", None, Some(json!({
        "email": "tech@garage.test",
        "password": "hunter22-secure",
        "shopName": "",
    }))).await;
    assert_eq!(response.status(), 400);

    let response = app.request("POST", "/auth/signup", None, Some(json!({
        "email": "named@garage.test",
        "password": "hunter22-secure",
        "displayName": "Mike",
        "shopName": "Mike's Transmission",
    }))).await;
    assert_eq!(response.status(), 201);
    let body = read_json(response).await;
    assert_eq!(body["user"]["displayName"], "Mike");
    assert_eq!(body["shop"]["name"], "Mike's Transmission");
}

#[tokio::test]
async fn test_mistyped_signup_body_is_a_json_bad_request() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/auth/signup", None, Some(json!({
        "email": 5,
        "password": "hunter22-secure",
    }))).await;
    assert_eq!(response.status(), 400);
    assert!(read_json(response).await["error"].is_string());

    let response = app.request("POST", "/auth/login", None, Some(json!({
        "email": ["tech@garage.test"],
        "password": "hunter22-secure",
    }))).await;
    assert_eq!(response.status(), 400);
    assert!(read_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_failed_user_insert_leaves_no_shop_behind() {
    let app = TestApp::new().await;
    assert_eq!(app.signup("taken@garage.test", "hunter22-secure").await.status(), 201);

    let shop = Shop::new("Second Shop".to_string());
    let user = User::new(shop.id.clone(), "taken@garage.test", String::new(), None);

    let result = app.state.user_repo.create_with_shop(&shop, &user).await;
    assert!(result.is_err());
    assert!(app.state.shop_repo.find_by_id(&shop.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = TestApp::new().await;
    app.signup("tech@garage.test", "hunter22-secure").await;

    let wrong_password = app.request("POST", "/auth/login", None, Some(json!({
        "email": "tech@garage.test",
        "password": "wrong-password",
    }))).await;
    assert_eq!(wrong_password.status(), 401);
    let wrong_password_body = read_json(wrong_password).await;

    let unknown_user = app.request("POST", "/auth/login", None, Some(json!({
        "email": "nobody@garage.test",
        "password": "hunter22-secure",
    }))).await;
    assert_eq!(unknown_user.status(), 401);
    assert_eq!(read_json(unknown_user).await, wrong_password_body);

    let missing = app.request("POST", "/auth/login", None, Some(json!({ "email": "tech@garage.test" }))).await;
    assert_eq!(missing.status(), 400);
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::new().await;
    app.signup("Mixed.Case@Garage.test", "hunter22-secure").await;

    let cookie = app.login("mixed.case@garage.test", "hunter22-secure").await;
    assert!(cookie.starts_with("obdscribe_session="));
}

#[tokio::test]
async fn test_protected_routes_require_valid_session() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/settings/shop", None, None).await;
    assert_eq!(response.status(), 401);

    let response = app.request("GET", "/reports", Some("obdscribe_session=garbage"), None).await;
    assert_eq!(response.status(), 401);

    let response = app.request("GET", "/reports/export", Some("obdscribe_session="), None).await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;
    let cookie = app.create_account("leaving@garage.test").await;

    let response = app.request("POST", "/auth/logout", Some(&cookie), None).await;
    assert_eq!(response.status(), 200);
    let cleared = set_cookie_header(&response);
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_dev_identity_only_outside_production() {
    let app = TestApp::with_config(|c| {
        c.dev_identity = Some(obdscribe::config::DevIdentity {
            user_id: "dev-user".into(),
            shop_id: "dev-shop".into(),
        });
    }).await;

    // Bound to the dev identity, which has no user row.
    let response = app.request("GET", "/settings/user", None, None).await;
    assert_eq!(response.status(), 404);

    let app = TestApp::with_config(|c| {
        c.production = true;
        c.dev_identity = Some(obdscribe::config::DevIdentity {
            user_id: "dev-user".into(),
            shop_id: "dev-shop".into(),
        });
    }).await;

    let response = app.request("GET", "/settings/user", None, None).await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_production_cookie_is_secure() {
    let app = TestApp::with_config(|c| c.production = true).await;
    app.signup("prod@garage.test", "hunter22-secure").await;

    let response = app.request("POST", "/auth/login", None, Some(json!({
        "email": "prod@garage.test",
        "password": "hunter22-secure",
    }))).await;
    assert_eq!(response.status(), 200);
    assert!(set_cookie_header(&response).contains("Secure"));
}
