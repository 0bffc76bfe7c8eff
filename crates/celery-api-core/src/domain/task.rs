//! Task request and result types exchanged over the HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A request to run a named Celery task.
///
/// Field names follow the wire format clients already send
/// (`{"Name": "tasks.add", "Args": ["4", "8"]}`); lowercase names are
/// accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Fully qualified task name as registered with the worker.
    #[serde(rename = "Name", alias = "name")]
    pub name: String,

    /// Positional arguments.
    #[serde(rename = "Args", alias = "args", default)]
    pub args: Vec<Value>,

    /// Keyword arguments.
    #[serde(rename = "Kwargs", alias = "kwargs", default)]
    pub kwargs: Map<String, Value>,
}

/// Reasons a task request is rejected before anything is published.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    #[error("Task name cannot be empty")]
    EmptyName,

    #[error("Task name must not contain whitespace: {0:?}")]
    WhitespaceInName(String),
}

impl TaskRequest {
    /// Create a request with positional arguments only.
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
            kwargs: Map::new(),
        }
    }

    /// Add a keyword argument.
    #[must_use]
    pub fn with_kwarg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.kwargs.insert(key.into(), value);
        self
    }

    /// Check the request can be turned into a Celery message.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(TaskValidationError::WhitespaceInName(self.name.clone()));
        }
        Ok(())
    }
}

/// Outcome of a publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Success,
    Failure,
}

/// Response body for `POST /tasks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    #[serde(rename = "Status")]
    pub status: TaskStatus,
}

impl TaskResult {
    pub const fn success() -> Self {
        Self {
            status: TaskStatus::Success,
        }
    }

    pub const fn failure() -> Self {
        Self {
            status: TaskStatus::Failure,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.status, TaskStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_capitalised_fields() {
        let req: TaskRequest =
            serde_json::from_str(r#"{"Name": "tasks.add", "Args": ["4", "8"]}"#).unwrap();
        assert_eq!(req.name, "tasks.add");
        assert_eq!(req.args, vec![json!("4"), json!("8")]);
        assert!(req.kwargs.is_empty());
    }

    #[test]
    fn test_decode_lowercase_fields_with_kwargs() {
        let req: TaskRequest = serde_json::from_str(
            r#"{"name": "tasks.mul", "args": [2], "kwargs": {"scale": 10}}"#,
        )
        .unwrap();
        assert_eq!(req.name, "tasks.mul");
        assert_eq!(req.kwargs.get("scale"), Some(&json!(10)));
    }

    #[test]
    fn test_missing_name_is_a_decode_error() {
        let result: Result<TaskRequest, _> = serde_json::from_str(r#"{"Args": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let req = TaskRequest::new("   ", vec![]);
        assert_eq!(req.validate(), Err(TaskValidationError::EmptyName));
    }

    #[test]
    fn test_validate_rejects_whitespace() {
        let req = TaskRequest::new("tasks add", vec![]);
        assert!(matches!(
            req.validate(),
            Err(TaskValidationError::WhitespaceInName(_))
        ));
    }

    #[test]
    fn test_result_wire_format() {
        assert_eq!(
            serde_json::to_string(&TaskResult::success()).unwrap(),
            r#"{"Status":"success"}"#
        );
        assert_eq!(
            serde_json::to_string(&TaskResult::failure()).unwrap(),
            r#"{"Status":"failure"}"#
        );
    }
}
