//! Shared test doubles for router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use celery_api_core::{BrokerError, CeleryMessage, TaskBroker};

/// In-memory broker that records published messages.
#[derive(Default)]
pub struct RecordingBroker {
    published: Mutex<Vec<CeleryMessage>>,
    fail: bool,
}

impl RecordingBroker {
    /// A broker whose publishes always fail.
    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn published(&self) -> Vec<CeleryMessage> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskBroker for RecordingBroker {
    async fn publish(&self, message: &CeleryMessage) -> Result<(), BrokerError> {
        if self.fail {
            return Err(BrokerError::Unavailable("connection closed".to_string()));
        }
        self.published.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        !self.fail
    }
}
