pub mod app_config;
pub mod error;
pub mod position;
pub mod time_util;
