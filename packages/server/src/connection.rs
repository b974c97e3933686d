//! Database connection supervision.
//!
//! A background task owns the connection lifecycle and publishes its current
//! state through a watch channel. Request handling only ever reads that state,
//! so choosing a backend never waits on the network.

use std::time::Duration;

use sea_orm::{DatabaseConnection, DbErr};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::database::init_db;

/// Lifecycle of the database connection.
#[derive(Clone)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected(DatabaseConnection),
    Failed(String),
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected(_) => "connected",
            Self::Failed(_) => "error",
        }
    }
}

/// Answers whether the durable backend can be used right now.
pub trait ConnectionProbe: Send + Sync {
    /// The live connection, only when fully established.
    fn connection(&self) -> Option<DatabaseConnection>;

    /// Label of the current connection state, for operators.
    fn state_label(&self) -> &'static str;

    fn is_backend_available(&self) -> bool {
        self.connection().is_some()
    }
}

/// Read side of the supervisor's state channel.
#[derive(Clone)]
pub struct ConnectionStatus {
    rx: watch::Receiver<ConnectionState>,
}

impl ConnectionStatus {
    /// A status that never becomes available.
    pub fn disconnected() -> Self {
        let (_tx, rx) = watch::channel(ConnectionState::Disconnected);
        Self { rx }
    }

    /// A status pinned to an already established connection.
    pub fn connected(db: DatabaseConnection) -> Self {
        let (_tx, rx) = watch::channel(ConnectionState::Connected(db));
        Self { rx }
    }
}

impl ConnectionProbe for ConnectionStatus {
    fn connection(&self) -> Option<DatabaseConnection> {
        match &*self.rx.borrow() {
            ConnectionState::Connected(db) => Some(db.clone()),
            _ => None,
        }
    }

    fn state_label(&self) -> &'static str {
        self.rx.borrow().label()
    }

    fn is_backend_available(&self) -> bool {
        matches!(*self.rx.borrow(), ConnectionState::Connected(_))
    }
}

/// Start supervising the configured database.
///
/// Without a URL no task is spawned and the status stays `disconnected`.
pub fn spawn_supervisor(config: &DatabaseConfig) -> (ConnectionStatus, Option<JoinHandle<()>>) {
    let (tx, rx) = watch::channel(ConnectionState::Disconnected);
    let status = ConnectionStatus { rx };

    let Some(url) = config.url.clone() else {
        info!("No database configured, case studies will use the file store");
        return (status, None);
    };

    let handle = tokio::spawn(supervise(
        url,
        Duration::from_secs(config.connect_timeout_secs),
        Duration::from_secs(config.health_check_interval_secs.max(1)),
        Duration::from_secs(config.reconnect_interval_secs),
        tx,
    ));
    (status, Some(handle))
}

async fn supervise(
    url: String,
    connect_timeout: Duration,
    health_check_interval: Duration,
    reconnect_interval: Duration,
    tx: watch::Sender<ConnectionState>,
) {
    loop {
        tx.send_replace(ConnectionState::Connecting);

        match init_db(&url, connect_timeout).await {
            Ok(db) => {
                info!("Database connected");
                tx.send_replace(ConnectionState::Connected(db.clone()));

                let err = wait_for_failure(&db, health_check_interval).await;
                warn!(error = %err, "Database connection lost, falling back to file store");
                tx.send_replace(ConnectionState::Disconnected);
            }
            Err(err) => {
                warn!(error = %err, "Database unavailable, falling back to file store");
                tx.send_replace(ConnectionState::Failed(err.to_string()));
            }
        }

        if tx.is_closed() {
            return;
        }
        tokio::time::sleep(reconnect_interval).await;
    }
}

/// Ping periodically until the connection stops answering.
async fn wait_for_failure(db: &DatabaseConnection, interval: Duration) -> DbErr {
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if let Err(err) = db.ping().await {
            return err;
        }
    }
}
