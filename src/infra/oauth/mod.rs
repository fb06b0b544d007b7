pub mod google_service;
