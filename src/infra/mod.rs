pub mod ai;
pub mod factory;
pub mod oauth;
pub mod repositories;
