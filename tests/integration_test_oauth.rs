mod common;
use common::{read_json, session_cookie, TestApp};

fn location(response: &axum::http::Response<axum::body::Body>) -> String {
    response.headers()["location"].to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_start_returns_url_with_signed_state() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/auth/google/start?redirect=/app/history", None, None).await;
    assert_eq!(response.status(), 200);

    let url = read_json(response).await["url"].as_str().unwrap().to_string();
    let state = url.split("state=").nth(1).unwrap();
    assert_eq!(app.state.oauth_state.decode(state).as_deref(), Some("/app/history"));
}

#[tokio::test]
async fn test_start_replaces_offsite_redirect() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/auth/google/start?redirect=//evil.example", None, None).await;
    let url = read_json(response).await["url"].as_str().unwrap().to_string();
    let state = url.split("state=").nth(1).unwrap();
    assert_eq!(app.state.oauth_state.decode(state).as_deref(), Some("/app/new-report"));
}

#[tokio::test]
async fn test_callback_error_redirects() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/auth/google/callback?error=access_denied", None, None).await;
    assert_eq!(response.status(), 302);
    assert_eq!(location(&response), "http://localhost:3000/login?googleError=access_denied");

    let response = app.request("GET", "/auth/google/callback?code=abc", None, None).await;
    assert_eq!(location(&response), "http://localhost:3000/login?googleError=missing_code_or_state");

    let response = app.request("GET", "/auth/google/callback?code=abc&state=forged.state", None, None).await;
    assert_eq!(location(&response), "http://localhost:3000/login?googleError=invalid_state");
}

#[tokio::test]
async fn test_callback_creates_account_then_signs_in_again() {
    let app = TestApp::new().await;
    app.oauth.sign_in_as("google-sub-1", "New.Tech@Gmail.test");
    let state = app.state.oauth_state.encode("/app/history");

    let response = app.request("GET", &format!("/auth/google/callback?code=abc&state={}", state), None, None).await;
    assert_eq!(response.status(), 302);
    assert_eq!(location(&response), "http://localhost:3000/app/history");
    let cookie = session_cookie(&response).expect("session cookie");

    let user = read_json(app.request("GET", "/settings/user", Some(&cookie), None).await).await;
    assert_eq!(user["email"], "new.tech@gmail.test");
    assert_eq!(user["displayName"], "Google Tech");

    let response = app.request("GET", &format!("/auth/google/callback?code=def&state={}", state), None, None).await;
    let second_cookie = session_cookie(&response).expect("session cookie");
    let again = read_json(app.request("GET", "/settings/user", Some(&second_cookie), None).await).await;
    assert_eq!(again["id"], user["id"]);
}

#[tokio::test]
async fn test_callback_refuses_to_link_existing_email() {
    let app = TestApp::new().await;
    app.signup("owner@garage.test", "hunter22-secure").await;
    app.oauth.sign_in_as("google-sub-2", "owner@garage.test");
    let state = app.state.oauth_state.encode("/app/new-report");

    let response = app.request("GET", &format!("/auth/google/callback?code=abc&state={}", state), None, None).await;
    assert_eq!(response.status(), 302);
    assert_eq!(location(&response), "http://localhost:3000/login?googleError=email_in_use");
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn test_callback_provider_failure() {
    let app = TestApp::new().await;
    let state = app.state.oauth_state.encode("/app/new-report");

    let response = app.request("GET", &format!("/auth/google/callback?code=abc&state={}", state), None, None).await;
    assert_eq!(location(&response), "http://localhost:3000/login?googleError=callback_failed");
}
