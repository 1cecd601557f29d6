pub mod config;
pub mod halter;
pub mod logging;
