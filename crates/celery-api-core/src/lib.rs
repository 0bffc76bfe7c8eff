#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod cookbook;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, DEFAULT_AMQPS_PORT, DEFAULT_HTTP_PORT, DEFAULT_ROUTING_KEY, ServiceConfig,
};
pub use cookbook::{CookbookError, CookbookMetadata, Dependency, discover_cookbooks};
pub use domain::{CeleryMessage, TaskRequest, TaskResult, TaskStatus};
pub use ports::{BrokerError, CoreError, TaskBroker};
pub use services::TaskService;
