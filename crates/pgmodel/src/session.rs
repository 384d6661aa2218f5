//! Opening the catalog session.

use std::time::Duration;

use tokio_postgres::{Client, NoTls};

use crate::{Error, Result};

/// Connect timeout applied when the config does not set one.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Open one connection for a resolution run.
///
/// The connection driver is spawned on the current tokio runtime and lives as
/// long as the returned client; dropping the client closes it. The timeout
/// only covers the connect phase, queries themselves are not bounded.
pub async fn connect(config: &tokio_postgres::Config) -> Result<Client> {
    let mut config = config.clone();
    if config.get_connect_timeout().is_none() {
        config.connect_timeout(DEFAULT_CONNECT_TIMEOUT);
    }

    let (client, connection) = config.connect(NoTls).await.map_err(Error::Connect)?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("postgres connection error: {}", e);
        }
    });

    let dbname = config.get_dbname().unwrap_or_default();
    tracing::debug!(dbname, "connected");

    Ok(client)
}
