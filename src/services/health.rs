use crate::dto::health::{DbStatus, HealthReport};
use crate::repository::StoreProbe;

/// Reports liveness together with store reachability. Never fails.
pub fn check_health<R>(repo: &R) -> HealthReport
where
    R: StoreProbe,
{
    let db_status = match repo.ping() {
        Ok(()) => DbStatus::Connected,
        Err(e) => {
            log::warn!("Health check could not reach the store: {e}");
            DbStatus::Disconnected
        }
    };
    HealthReport::running(db_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::TestRepository;

    #[test]
    fn reports_store_state() {
        let up = check_health(&TestRepository::default());
        assert_eq!(up.db_status, DbStatus::Connected);
        assert_eq!(up.status, "OK");

        let down = check_health(&TestRepository::unavailable());
        assert_eq!(down.db_status, DbStatus::Disconnected);
    }
}
