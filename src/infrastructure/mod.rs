// Infrastructure module - External dependencies and adapters
pub mod activity_log;
pub mod config;
pub mod logging;
pub mod serial;
