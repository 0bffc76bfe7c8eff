//! Celery task protocol v1 message body.
//!
//! Workers consuming the `celery` queue decode this JSON document to find
//! the task to run and its arguments.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::task::TaskRequest;

/// MIME type of the encoded body.
pub const CELERY_CONTENT_TYPE: &str = "application/json";

/// Character encoding of the encoded body.
pub const CELERY_CONTENT_ENCODING: &str = "utf-8";

/// A task message ready to be published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeleryMessage {
    /// Unique task id (UUID v4).
    pub id: String,
    /// Task name.
    pub task: String,
    pub args: Vec<Value>,
    pub kwargs: Map<String, Value>,
    pub retries: u32,
    /// Earliest execution time, RFC 3339.
    pub eta: String,
    /// Expiry time, RFC 3339. Omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expires: Option<String>,
}

impl CeleryMessage {
    /// Build a message for immediate execution.
    pub fn new(task: impl Into<String>, args: Vec<Value>, kwargs: Map<String, Value>) -> Self {
        Self::with_eta(task, args, kwargs, Utc::now())
    }

    /// Build a message scheduled for `eta`.
    pub fn with_eta(
        task: impl Into<String>,
        args: Vec<Value>,
        kwargs: Map<String, Value>,
        eta: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            task: task.into(),
            args,
            kwargs,
            retries: 0,
            eta: eta.to_rfc3339_opts(SecondsFormat::Secs, true),
            expires: None,
        }
    }

    /// Set an expiry time after which workers discard the task.
    #[must_use]
    pub fn expiring_at(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires.to_rfc3339_opts(SecondsFormat::Secs, true));
        self
    }

    /// Encode the message body.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl From<TaskRequest> for CeleryMessage {
    fn from(req: TaskRequest) -> Self {
        Self::new(req.name, req.args, req.kwargs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_body_layout() {
        let eta = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let msg = CeleryMessage::with_eta("tasks.add", vec![json!("4"), json!("8")], Map::new(), eta);

        let body: Value = serde_json::from_slice(&msg.to_bytes().unwrap()).unwrap();
        assert_eq!(body["task"], "tasks.add");
        assert_eq!(body["args"], json!(["4", "8"]));
        assert_eq!(body["kwargs"], json!({}));
        assert_eq!(body["retries"], 0);
        assert_eq!(body["eta"], "2024-05-01T12:00:00Z");
        assert!(body.get("expires").is_none());
        assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_expires_is_serialised_when_set() {
        let eta = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let msg = CeleryMessage::with_eta("tasks.add", vec![], Map::new(), eta)
            .expiring_at(Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap());

        let body: Value = serde_json::from_slice(&msg.to_bytes().unwrap()).unwrap();
        assert_eq!(body["expires"], "2024-05-01T13:00:00Z");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = CeleryMessage::new("t", vec![], Map::new());
        let b = CeleryMessage::new("t", vec![], Map::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_from_request_keeps_arguments() {
        let req = TaskRequest::new("tasks.mul", vec![json!(3)]).with_kwarg("scale", json!(2));
        let msg = CeleryMessage::from(req);
        assert_eq!(msg.task, "tasks.mul");
        assert_eq!(msg.args, vec![json!(3)]);
        assert_eq!(msg.kwargs.get("scale"), Some(&json!(2)));
    }
}
