pub mod device_token;
pub mod notification;
