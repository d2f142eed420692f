//! Configuration read once from the environment at startup.
//! A `.env` file is loaded by `main` before any of these are touched.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server URL
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| {
    env::var("BOT_API_URL")
        .ok()
        .and_then(|s| if s.trim().is_empty() { None } else { Some(s) })
});

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: students.db
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "students.db".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Admin configuration
pub mod admin {
    use once_cell::sync::Lazy;
    use std::env;

    pub(crate) fn parse_admin_ids(raw: &str) -> Vec<i64> {
        raw.split([',', ' ', '\n', '\t'])
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .collect()
    }

    /// Admin user IDs (comma-separated)
    /// Read from ADMIN_IDS environment variable
    pub static ADMIN_IDS: Lazy<Vec<i64>> = Lazy::new(|| {
        env::var("ADMIN_IDS")
            .ok()
            .map(|raw| parse_admin_ids(&raw))
            .unwrap_or_default()
    });
}

/// Attendance rules
pub mod attendance {
    use once_cell::sync::Lazy;
    use std::env;

    /// Flows offered when FLOWS is not set
    pub const DEFAULT_FLOWS: [&str; 4] = ["Север", "Юг", "Запад", "Восток"];

    pub(crate) fn parse_flows(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|flow| !flow.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Flow names (comma-separated)
    /// Read from FLOWS environment variable
    /// Default: Север, Юг, Запад, Восток
    pub static FLOWS: Lazy<Vec<String>> = Lazy::new(|| {
        let flows = env::var("FLOWS").map(|raw| parse_flows(&raw)).unwrap_or_default();
        if flows.is_empty() {
            DEFAULT_FLOWS.iter().map(|flow| flow.to_string()).collect()
        } else {
            flows
        }
    });

    /// Number of visits required for credit
    /// Read from REQUIRED_VISITS environment variable
    /// Default: 5
    pub static REQUIRED_VISITS: Lazy<u32> = Lazy::new(|| {
        env::var("REQUIRED_VISITS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5)
    });
}

/// Registration conversation configuration
pub mod conversation {
    use super::Duration;
    use once_cell::sync::Lazy;
    use std::env;

    /// Idle time after which an unfinished registration is dropped
    /// Read from SESSION_TTL_SECS environment variable
    /// Default: 1800 seconds (30 minutes)
    pub static SESSION_TTL_SECS: Lazy<u64> = Lazy::new(|| {
        env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1800)
    });

    /// Session idle timeout duration
    pub fn session_ttl() -> Duration {
        Duration::from_secs(*SESSION_TTL_SECS)
    }
}

/// Immutable runtime settings shared by all handlers.
///
/// Built once from the environment in production, constructed directly in tests.
#[derive(Debug, Clone)]
pub struct Settings {
    pub admin_ids: HashSet<i64>,
    pub flows: Vec<String>,
    pub required_visits: u32,
    pub session_ttl: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            admin_ids: admin::ADMIN_IDS.iter().copied().collect(),
            flows: attendance::FLOWS.clone(),
            required_visits: *attendance::REQUIRED_VISITS,
            session_ttl: conversation::session_ttl(),
        }
    }

    /// Static membership test against the configured admin ids.
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_admin_ids_mixed_separators() {
        assert_eq!(admin::parse_admin_ids("1, 2\n3\tx,,4"), vec![1, 2, 3, 4]);
        assert!(admin::parse_admin_ids("").is_empty());
    }

    #[test]
    fn test_parse_flows_trims_and_skips_empty() {
        assert_eq!(attendance::parse_flows(" Север , Юг,, "), vec!["Север", "Юг"]);
    }

    #[test]
    fn test_settings_membership() {
        let settings = Settings {
            admin_ids: [42].into_iter().collect(),
            flows: vec!["Север".to_string()],
            required_visits: 5,
            session_ttl: Duration::from_secs(60),
        };
        assert!(settings.is_admin(42));
        assert!(!settings.is_admin(7));
    }
}
