//! Opening connections and channels, with retry.

use amqprs::channel::Channel;
use amqprs::connection::{Connection, OpenConnectionArguments};
use celery_api_core::BrokerError;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::settings::BrokerSettings;
use crate::tls::build_adaptor;

/// An open connection and the channel used for publishing.
pub(crate) struct Link {
    pub connection: Connection,
    pub channel: Channel,
}

impl Link {
    pub fn is_open(&self) -> bool {
        self.connection.is_open() && self.channel.is_open()
    }

    /// Close channel then connection. Errors are logged, not returned.
    pub async fn close(self) {
        if let Err(e) = self.channel.close().await {
            debug!(error = %e, "Channel close failed");
        }
        if let Err(e) = self.connection.close().await {
            debug!(error = %e, "Connection close failed");
        }
    }
}

/// Make a single connection attempt.
pub(crate) async fn open_link(settings: &BrokerSettings) -> Result<Link, BrokerError> {
    let mut args = OpenConnectionArguments::new(
        &settings.host,
        settings.port,
        &settings.username,
        &settings.password,
    );
    args.virtual_host(&settings.virtual_host);
    if let Some(tls) = &settings.tls {
        args.tls_adaptor(build_adaptor(tls)?);
    }

    let connection = Connection::open(&args)
        .await
        .map_err(|e| BrokerError::Unavailable(e.to_string()))?;
    let channel = connection
        .open_channel(None)
        .await
        .map_err(|e| BrokerError::Unavailable(format!("open channel: {e}")))?;

    Ok(Link {
        connection,
        channel,
    })
}

/// Connect, retrying every `reconnect_delay` until it works or
/// `max_attempts` is reached. TLS setup errors are not retried.
pub(crate) async fn connect_with_retry(settings: &BrokerSettings) -> Result<Link, BrokerError> {
    let uri = settings.redacted_uri();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match open_link(settings).await {
            Ok(link) => {
                info!(uri = %uri, attempt, "Connected to broker");
                return Ok(link);
            }
            Err(e @ BrokerError::Tls(_)) => return Err(e),
            Err(e) => {
                if settings.max_attempts.is_some_and(|max| attempt >= max) {
                    warn!(uri = %uri, attempt, error = %e, "Giving up connecting to broker");
                    return Err(e);
                }
                warn!(
                    uri = %uri,
                    attempt,
                    error = %e,
                    "Error connecting to broker, retrying in {:?}",
                    settings.reconnect_delay
                );
                sleep(settings.reconnect_delay).await;
            }
        }
    }
}
