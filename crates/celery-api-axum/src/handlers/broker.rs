//! Broker status handler.

use axum::Json;
use axum::extract::State;

use crate::dto::BrokerStatusDto;
use crate::state::AppState;

/// Report whether a broker link is open.
pub async fn status(State(state): State<AppState>) -> Json<BrokerStatusDto> {
    Json(BrokerStatusDto {
        connected: state.tasks.broker_connected().await,
    })
}
