use std::env;
use tracing::warn;

const DEV_AUTH_SECRET: &str = "dev_secret_change_me";

#[derive(Clone, Debug)]
pub struct DevIdentity {
    pub user_id: String,
    pub shop_id: String,
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub production: bool,
    pub app_base_url: String,
    pub auth_secret: String,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub ai_model_standard: String,
    pub ai_model_premium: String,
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
    /// Key rate limits on the first `X-Forwarded-For` hop. Only safe behind a proxy that overwrites it.
    pub trust_forwarded_for: bool,
    /// Identity bound to unauthenticated requests. Never populated in production.
    pub dev_identity: Option<DevIdentity>,
}

impl Config {
    pub fn from_env() -> Self {
        let production = env::var("APP_ENV").map(|v| v == "production").unwrap_or(false);
        let app_base_url = env::var("APP_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let auth_secret = match env::var("AUTH_SECRET") {
            Ok(secret) => secret,
            Err(_) if production => panic!("AUTH_SECRET must be set in production"),
            Err(_) => {
                warn!("AUTH_SECRET not set, using development secret");
                DEV_AUTH_SECRET.to_string()
            }
        };

        let dev_identity = if production {
            None
        } else {
            match (env::var("DEV_AUTH_USER_ID"), env::var("DEV_AUTH_SHOP_ID")) {
                (Ok(user_id), Ok(shop_id)) => Some(DevIdentity { user_id, shop_id }),
                _ => None,
            }
        };

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            production,
            google_client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            google_redirect_uri: env::var("GOOGLE_REDIRECT_URI")
                .unwrap_or_else(|_| format!("{}/auth/google/callback", app_base_url)),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            ai_model_standard: env::var("OBDSCRIBE_AI_MODEL").unwrap_or_else(|_| "gpt-5-mini".to_string()),
            ai_model_premium: env::var("OBDSCRIBE_AI_MODEL_PREMIUM").unwrap_or_else(|_| "gpt-5.1".to_string()),
            rate_limit_max: env::var("RATE_LIMIT_MAX").ok().and_then(|v| v.parse().ok()).unwrap_or(20),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(60),
            trust_forwarded_for: env::var("TRUST_FORWARDED_FOR").map(|v| v == "true" || v == "1").unwrap_or(false),
            app_base_url,
            auth_secret,
            dev_identity,
        }
    }
}
