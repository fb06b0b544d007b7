pub mod auth;
pub mod health;
pub mod history;
pub mod oauth;
pub mod report;
pub mod settings;
