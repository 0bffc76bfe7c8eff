//! Task submission service.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{CeleryMessage, TaskRequest, TaskResult};
use crate::ports::{CoreError, TaskBroker};

/// Turns task requests into published Celery messages.
///
/// Invalid requests are rejected with [`CoreError::Validation`]. Broker
/// failures are not errors at this level: they are logged and reported to
/// the caller as a `failure` status.
#[derive(Clone)]
pub struct TaskService {
    broker: Arc<dyn TaskBroker>,
}

impl TaskService {
    pub fn new(broker: Arc<dyn TaskBroker>) -> Self {
        Self { broker }
    }

    /// Validate, build and publish a task.
    pub async fn submit(&self, request: TaskRequest) -> Result<TaskResult, CoreError> {
        request.validate()?;

        let message = CeleryMessage::from(request);
        info!(task = %message.task, id = %message.id, "Publishing task");

        match self.broker.publish(&message).await {
            Ok(()) => Ok(TaskResult::success()),
            Err(e) => {
                error!(task = %message.task, id = %message.id, error = %e, "Could not publish task");
                Ok(TaskResult::failure())
            }
        }
    }

    /// Whether the broker currently has an open connection.
    pub async fn broker_connected(&self) -> bool {
        self.broker.is_connected().await
    }
}
