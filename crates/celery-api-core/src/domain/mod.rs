//! Domain types for task submission.
//!
//! These are pure data types with no infrastructure dependencies.

mod celery;
mod task;

pub use celery::{CELERY_CONTENT_ENCODING, CELERY_CONTENT_TYPE, CeleryMessage};
pub use task::{TaskRequest, TaskResult, TaskStatus, TaskValidationError};
