use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::services::listing::BookingView;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub booking_tx: broadcast::Sender<BookingView>,
}

impl AppState {
    pub fn new(conn: Connection, config: AppConfig) -> Self {
        let (booking_tx, _) = broadcast::channel(256);
        Self {
            db: Arc::new(Mutex::new(conn)),
            config,
            booking_tx,
        }
    }

    /// Acquires the store connection for the duration of the returned guard.
    pub fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn test_state_keeps_config_and_shares_connection() {
        let config = AppConfig {
            port: 8081,
            database_url: ":memory:".to_string(),
            busy_timeout_ms: 250,
        };
        let conn = db::init_db(&config.database_url, config.busy_timeout_ms).unwrap();
        let state = AppState::new(conn, config);

        assert_eq!(state.config.port, 8081);
        assert_eq!(state.config.busy_timeout_ms, 250);

        let count: i64 = state
            .conn()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM service_bookings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
