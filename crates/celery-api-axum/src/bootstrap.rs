//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the AMQP broker is wired into the
//! task service for the web adapter.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use celery_api_amqp::{AmqpBroker, BrokerSettings};
use celery_api_core::{ServiceConfig, TaskBroker, TaskService};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::create_router_with_state;

/// How often the broker supervisor checks the connection.
pub const SUPERVISOR_INTERVAL: Duration = Duration::from_secs(1);

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Task submission service used by handlers.
    pub tasks: TaskService,
    /// Concrete broker, kept so it can be closed on shutdown.
    amqp: Option<Arc<AmqpBroker>>,
}

impl AxumContext {
    /// Build a context around any broker implementation.
    pub fn new(broker: Arc<dyn TaskBroker>) -> Self {
        Self {
            tasks: TaskService::new(broker),
            amqp: None,
        }
    }

    /// Close the broker connection, if this context owns one.
    pub async fn shutdown(&self) {
        if let Some(broker) = &self.amqp {
            broker.close().await;
        }
    }
}

/// Connect the broker and assemble the context.
///
/// Blocks until the broker accepts a connection; the supervisor keeps it
/// alive afterwards.
pub async fn bootstrap(config: &ServiceConfig) -> Result<AxumContext> {
    config.validate()?;

    let settings = BrokerSettings::from(config);
    info!(
        target: "celery_api.broker",
        uri = %config.redacted_uri(),
        exchange = %settings.exchange,
        routing_key = %settings.routing_key,
        "Connecting to broker"
    );

    let broker = Arc::new(AmqpBroker::connect(settings).await?);
    broker.spawn_supervisor(SUPERVISOR_INTERVAL).await;

    Ok(AxumContext {
        tasks: TaskService::new(broker.clone()),
        amqp: Some(broker),
    })
}

/// Start the web server on `config.http_port` and serve until ctrl-c.
pub async fn start_server(config: ServiceConfig) -> Result<()> {
    let ctx = Arc::new(bootstrap(&config).await?);
    let app = create_router_with_state(Arc::clone(&ctx));

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("celery-api listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    ctx.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
    }
}
