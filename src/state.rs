use std::sync::Arc;
use crate::domain::ports::{
    LlmService, OAuthProvider, ReferenceRepository, ReportRepository, ShopRepository, UserRepository,
};
use crate::domain::services::{
    account_service::AccountService,
    history_service::HistoryService,
    oauth_state::OAuthStateSigner,
    rate_limiter::RateLimiter,
    report_service::{ModelSelection, ReportService},
    session_service::SessionService,
    settings_service::SettingsService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub shop_repo: Arc<dyn ShopRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub report_repo: Arc<dyn ReportRepository>,
    pub reference_repo: Arc<dyn ReferenceRepository>,
    pub llm_service: Arc<dyn LlmService>,
    pub oauth_provider: Arc<dyn OAuthProvider>,
    pub session_service: Arc<SessionService>,
    pub oauth_state: Arc<OAuthStateSigner>,
    pub account_service: Arc<AccountService>,
    pub report_service: Arc<ReportService>,
    pub history_service: Arc<HistoryService>,
    pub settings_service: Arc<SettingsService>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Wires the services on top of the given adapters.
    pub fn new(
        config: Config,
        shop_repo: Arc<dyn ShopRepository>,
        user_repo: Arc<dyn UserRepository>,
        report_repo: Arc<dyn ReportRepository>,
        reference_repo: Arc<dyn ReferenceRepository>,
        llm_service: Arc<dyn LlmService>,
        oauth_provider: Arc<dyn OAuthProvider>,
    ) -> Self {
        let models = ModelSelection {
            standard: config.ai_model_standard.clone(),
            premium: config.ai_model_premium.clone(),
        };

        Self {
            session_service: Arc::new(SessionService::new(&config.auth_secret)),
            oauth_state: Arc::new(OAuthStateSigner::new(&config.auth_secret)),
            account_service: Arc::new(AccountService::new(shop_repo.clone(), user_repo.clone())),
            report_service: Arc::new(ReportService::new(
                reference_repo.clone(),
                report_repo.clone(),
                llm_service.clone(),
                models,
            )),
            history_service: Arc::new(HistoryService::new(report_repo.clone())),
            settings_service: Arc::new(SettingsService::new(shop_repo.clone(), user_repo.clone())),
            rate_limiter: Arc::new(RateLimiter::new(
                config.rate_limit_max,
                std::time::Duration::from_secs(config.rate_limit_window_secs),
            )),
            config,
            shop_repo,
            user_repo,
            report_repo,
            reference_repo,
            llm_service,
            oauth_provider,
        }
    }
}
