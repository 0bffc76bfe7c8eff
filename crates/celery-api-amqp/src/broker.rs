//! `TaskBroker` implementation over AMQP.

use std::sync::Arc;
use std::time::Duration;

use amqprs::BasicProperties;
use amqprs::channel::BasicPublishArguments;
use async_trait::async_trait;
use celery_api_core::domain::{CELERY_CONTENT_ENCODING, CELERY_CONTENT_TYPE};
use celery_api_core::{BrokerError, CeleryMessage, TaskBroker};
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::connect::{Link, connect_with_retry, open_link};
use crate::settings::BrokerSettings;

/// AMQP delivery mode for messages that survive a broker restart.
const PERSISTENT: u8 = 2;

/// Publishes Celery messages to RabbitMQ.
///
/// Holds at most one live link. A link that is found closed is replaced,
/// either by the supervisor task or by a publish that finds it down.
pub struct AmqpBroker {
    settings: BrokerSettings,
    link: RwLock<Option<Link>>,
    supervisor: Mutex<Option<JoinHandle<()>>>,
}

impl AmqpBroker {
    /// Create a broker without connecting.
    pub fn new(settings: BrokerSettings) -> Self {
        Self {
            settings,
            link: RwLock::new(None),
            supervisor: Mutex::new(None),
        }
    }

    /// Create a broker and connect, retrying per the settings.
    pub async fn connect(settings: BrokerSettings) -> Result<Self, BrokerError> {
        let broker = Self::new(settings);
        let link = connect_with_retry(&broker.settings).await?;
        broker.install(link).await;
        Ok(broker)
    }

    /// Start a background task that checks the link every `interval` and
    /// reconnects when it has closed. Replaces any running supervisor.
    pub async fn spawn_supervisor(self: &Arc<Self>, interval: Duration) {
        let broker = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if broker.link_open().await {
                    continue;
                }

                warn!(uri = %broker.settings.redacted_uri(), "Broker connection closed, reconnecting");
                match connect_with_retry(&broker.settings).await {
                    Ok(link) => broker.install(link).await,
                    Err(e) => error!(error = %e, "Reconnect failed"),
                }
            }
        });

        if let Some(previous) = self.supervisor.lock().await.replace(handle) {
            previous.abort();
        }
    }

    /// Stop the supervisor and close the link.
    pub async fn close(&self) {
        if let Some(handle) = self.supervisor.lock().await.take() {
            handle.abort();
        }
        if let Some(link) = self.link.write().await.take() {
            link.close().await;
            info!("Broker connection closed");
        }
    }

    async fn link_open(&self) -> bool {
        self.link.read().await.as_ref().is_some_and(Link::is_open)
    }

    /// Store a freshly opened link unless a live one is already in place.
    async fn install(&self, link: Link) {
        let mut guard = self.link.write().await;
        if guard.as_ref().is_some_and(Link::is_open) {
            drop(guard);
            link.close().await;
            return;
        }
        let stale = guard.replace(link);
        drop(guard);
        if let Some(stale) = stale {
            stale.close().await;
        }
    }

    fn properties(message: &CeleryMessage) -> BasicProperties {
        let timestamp = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        BasicProperties::default()
            .with_content_type(CELERY_CONTENT_TYPE)
            .with_content_encoding(CELERY_CONTENT_ENCODING)
            .with_delivery_mode(PERSISTENT)
            .with_message_id(&message.id)
            .with_timestamp(timestamp)
            .finish()
    }
}

#[async_trait]
impl TaskBroker for AmqpBroker {
    async fn publish(&self, message: &CeleryMessage) -> Result<(), BrokerError> {
        let body = message.to_bytes()?;

        if !self.link_open().await {
            warn!("No open broker link, attempting immediate reconnect");
            let link = open_link(&self.settings)
                .await
                .map_err(|e| BrokerError::Unavailable(e.to_string()))?;
            self.install(link).await;
        }

        let guard = self.link.read().await;
        let Some(link) = guard.as_ref().filter(|l| l.is_open()) else {
            return Err(BrokerError::Unavailable("no open channel".to_string()));
        };

        let args = BasicPublishArguments::new(&self.settings.exchange, &self.settings.routing_key);
        link.channel
            .basic_publish(Self::properties(message), body, args)
            .await
            .map_err(|e| BrokerError::Publish(e.to_string()))
    }

    async fn is_connected(&self) -> bool {
        self.link_open().await
    }
}
