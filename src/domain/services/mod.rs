pub mod account_service;
pub mod csv_export;
pub mod history_service;
pub mod oauth_state;
pub mod pdf_export;
pub mod rate_limiter;
pub mod report_service;
pub mod session_service;
pub mod settings_service;
