//! Response DTOs that are specific to the HTTP surface.

use serde::Serialize;

/// Body of `GET /broker/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrokerStatusDto {
    pub connected: bool,
}
