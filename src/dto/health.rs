use serde::{Deserialize, Serialize};

/// Liveness report. The server answers even when the store is down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub message: String,
    #[serde(rename = "dbStatus")]
    pub db_status: DbStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbStatus {
    Connected,
    Disconnected,
}

impl HealthReport {
    pub fn running(db_status: DbStatus) -> Self {
        Self {
            status: "OK".to_string(),
            message: "Server is running".to_string(),
            db_status,
        }
    }
}
