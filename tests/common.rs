#![allow(dead_code)]

use obdscribe::{
    api::router::create_router,
    config::Config,
    domain::ports::{LlmService, OAuthProfile, OAuthProvider, OAuthTokens},
    error::AppError,
    infra::repositories::{
        sqlite_reference_repo::SqliteReferenceRepo,
        sqlite_report_repo::SqliteReportRepo,
        sqlite_shop_repo::SqliteShopRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const STANDARD_MODEL: &str = "test-standard";
pub const PREMIUM_MODEL: &str = "test-premium";

pub const GOOD_MODEL_OUTPUT: &str = r#"{"techView":"Cylinder 1 misfire, check coil and plug.","customerView":"One cylinder is not firing properly.","maintenanceSuggestions":["Replace spark plugs","Inspect ignition coils"]}"#;

pub struct LlmCall {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
}

/// Answers with a preset reply and records every call.
pub struct MockLlmService {
    pub reply: Mutex<Result<String, String>>,
    pub calls: Mutex<Vec<LlmCall>>,
}

impl MockLlmService {
    fn new() -> Self {
        Self {
            reply: Mutex::new(Ok(GOOD_MODEL_OUTPUT.to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn reply_with(&self, raw: &str) {
        *self.reply.lock() = Ok(raw.to_string());
    }

    pub fn fail_with(&self, message: &str) {
        *self.reply.lock() = Err(message.to_string());
    }

    pub fn last_call(&self) -> Option<LlmCall> {
        self.calls.lock().pop()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn generate_json(&self, model: &str, system_prompt: &str, user_prompt: &str) -> Result<String, AppError> {
        self.calls.lock().push(LlmCall {
            model: model.to_string(),
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
        });
        self.reply.lock().clone().map_err(AppError::Upstream)
    }
}

/// `None` profile makes the code exchange fail.
pub struct MockOAuthProvider {
    pub profile: Mutex<Option<OAuthProfile>>,
}

impl MockOAuthProvider {
    pub fn sign_in_as(&self, sub: &str, email: &str) {
        *self.profile.lock() = Some(OAuthProfile {
            sub: sub.to_string(),
            email: email.to_string(),
            email_verified: Some(true),
            name: Some("Google Tech".to_string()),
            picture: None,
        });
    }
}

#[async_trait]
impl OAuthProvider for MockOAuthProvider {
    fn provider_name(&self) -> &'static str {
        "google"
    }

    fn authorization_url(&self, state: &str, _redirect_hint: Option<&str>) -> String {
        format!("https://accounts.example.test/o/oauth2/v2/auth?state={}", state)
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, AppError> {
        if self.profile.lock().is_none() {
            return Err(AppError::Upstream("EXCHANGE_FAILED: 400".into()));
        }
        Ok(OAuthTokens {
            access_token: format!("token-for-{}", code),
            id_token: None,
            expires_in: Some(3600),
            refresh_token: None,
            scope: None,
            token_type: Some("Bearer".into()),
        })
    }

    async fn fetch_profile(&self, _access_token: &str) -> Result<OAuthProfile, AppError> {
        self.profile.lock().clone()
            .ok_or(AppError::Upstream("PROFILE_FETCH_FAILED: 401".into()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub llm: Arc<MockLlmService>,
    pub oauth: Arc<MockOAuthProvider>,
}

pub fn test_config(db_url: &str) -> Config {
    Config {
        database_url: db_url.to_string(),
        port: 0,
        production: false,
        app_base_url: "http://localhost:3000".to_string(),
        auth_secret: "test-secret".to_string(),
        google_client_id: "client-id".to_string(),
        google_client_secret: "client-secret".to_string(),
        google_redirect_uri: "http://localhost:3000/auth/google/callback".to_string(),
        openai_api_key: "sk-test".to_string(),
        openai_base_url: "http://localhost:9".to_string(),
        ai_model_standard: STANDARD_MODEL.to_string(),
        ai_model_premium: PREMIUM_MODEL.to_string(),
        rate_limit_max: 20,
        rate_limit_window_secs: 60,
        trust_forwarded_for: false,
        dev_identity: None,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(configure: impl FnOnce(&mut Config)) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut config = test_config(&db_url);
        configure(&mut config);

        let llm = Arc::new(MockLlmService::new());
        let oauth = Arc::new(MockOAuthProvider { profile: Mutex::new(None) });

        let state = Arc::new(AppState::new(
            config,
            Arc::new(SqliteShopRepo::new(pool.clone())),
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteReportRepo::new(pool.clone())),
            Arc::new(SqliteReferenceRepo::new(pool.clone())),
            llm.clone(),
            oauth.clone(),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            llm,
            oauth,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn signup(&self, email: &str, password: &str) -> Response<Body> {
        self.request("POST", "/auth/signup", None, Some(json!({
            "email": email,
            "password": password,
        }))).await
    }

    /// Logs in and returns the `name=value` pair to send back as a Cookie header.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self.request("POST", "/auth/login", None, Some(json!({
            "email": email,
            "password": password,
        }))).await;

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        session_cookie(&response).expect("No session cookie returned")
    }

    /// Fresh shop + owner, already logged in.
    pub async fn create_account(&self, email: &str) -> String {
        let response = self.signup(email, "correct-horse-battery").await;
        assert_eq!(response.status(), 201, "signup failed for {}", email);
        self.login(email, "correct-horse-battery").await
    }

    pub async fn generate(&self, cookie: &str, body: Value) -> Response<Body> {
        self.request("POST", "/generate-report", Some(cookie), Some(body)).await
    }

    /// Generates a report with an `X-Forwarded-For` header set.
    pub async fn generate_forwarded(&self, cookie: &str, body: Value, forwarded_for: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri("/generate-report")
            .header(header::COOKIE, cookie)
            .header("x-forwarded-for", forwarded_for)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Generates a report and returns its id.
    pub async fn generate_ok(&self, cookie: &str, body: Value) -> String {
        let response = self.generate(cookie, body).await;
        assert_eq!(response.status(), 200);
        read_json(response).await["id"].as_str().unwrap().to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub fn sample_report() -> Value {
    json!({
        "year": 2015,
        "make": "Honda",
        "model": "Civic",
        "trim": "EX",
        "mileage": 72000,
        "codes": "P0301",
        "complaint": "Engine shakes at idle",
        "notes": "Customer reports check engine light flashing",
    })
}

pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find(|c| c.starts_with("obdscribe_session="))
        .map(|c| c.split(';').next().unwrap_or_default().to_string())
}

pub fn set_cookie_header(response: &Response<Body>) -> String {
    response.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find(|c| c.starts_with("obdscribe_session="))
        .unwrap_or_default()
        .to_string()
}

pub async fn read_body(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn read_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&read_body(response).await).unwrap()
}
