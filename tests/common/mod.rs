//! Common test utilities
//!
//! This module is shared across all integration tests

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use poseshenie::core::Settings;
use poseshenie::storage::{create_pool, DbPool};
use poseshenie::telegram::HandlerDeps;
use tempfile::TempDir;
use teloxide_tests::MockUser;

/// A migrated database in a temporary directory.
///
/// Keep the value alive for the duration of the test: the directory is removed on drop.
pub struct TestDatabase {
    _dir: TempDir,
    pub pool: Arc<DbPool>,
}

impl TestDatabase {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("students.db");
        let pool = create_pool(path.to_str().expect("Temp path is not UTF-8")).expect("Failed to create test database");
        Self {
            _dir: dir,
            pool: Arc::new(pool),
        }
    }
}

/// Id of the user every teloxide_tests mock update is sent from
#[allow(dead_code)]
pub fn mock_user_id() -> i64 {
    MockUser::new().build().id.0 as i64
}

/// Settings with the default flows and a quota of five visits
pub fn test_settings(admin_ids: &[i64]) -> Settings {
    Settings {
        admin_ids: admin_ids.iter().copied().collect::<HashSet<_>>(),
        flows: ["Север", "Юг", "Запад", "Восток"].iter().map(|s| s.to_string()).collect(),
        required_visits: 5,
        session_ttl: Duration::from_secs(1800),
    }
}

#[allow(dead_code)]
pub fn test_deps(db: &TestDatabase, admin_ids: &[i64]) -> HandlerDeps {
    HandlerDeps::new(Arc::clone(&db.pool), Arc::new(test_settings(admin_ids)))
}
