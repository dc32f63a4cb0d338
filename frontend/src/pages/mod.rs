pub mod analytics;
pub mod dashboard;
pub mod not_found;
pub mod notifications;
pub mod settings;
pub mod users;
