pub mod dispatch;
pub mod health_service;
pub mod registration_service;
