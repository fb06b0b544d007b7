pub mod report;
pub mod reference;
pub mod session;
pub mod shop;
pub mod user;
