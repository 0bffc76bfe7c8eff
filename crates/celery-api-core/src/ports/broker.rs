//! Message broker port.
//!
//! The service publishes Celery messages through this trait. The AMQP
//! implementation lives in `celery-api-amqp`; tests substitute mocks or
//! in-memory recorders.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::CeleryMessage;

/// Errors from broker operations.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// No usable connection and reconnecting failed.
    #[error("Broker unavailable: {0}")]
    Unavailable(String),

    /// Connection was open but publishing failed.
    #[error("Publish failed: {0}")]
    Publish(String),

    /// The message could not be encoded.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// TLS material could not be loaded.
    #[error("TLS configuration error: {0}")]
    Tls(String),
}

impl From<serde_json::Error> for BrokerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Publishes task messages to the broker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskBroker: Send + Sync {
    /// Publish one task message.
    async fn publish(&self, message: &CeleryMessage) -> Result<(), BrokerError>;

    /// Whether a connection is currently open.
    async fn is_connected(&self) -> bool;
}
