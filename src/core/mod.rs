// src/core/mod.rs
//! Shared services: configuration, HTTP access, file operations

pub mod config_manager;
pub mod fs_ops;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
pub use service_client::ServiceClient;
