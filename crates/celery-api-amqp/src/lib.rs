#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod broker;
mod connect;
mod settings;
mod tls;

pub use broker::AmqpBroker;
pub use settings::{BrokerSettings, TlsSettings};
