//! Handler types and dependencies

use std::sync::Arc;

use teloxide::types::User;

use crate::core::config::Settings;
use crate::storage::db::DbPool;
use crate::telegram::conversation::Conversations;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub db_pool: Arc<DbPool>,
    pub settings: Arc<Settings>,
    pub conversations: Arc<Conversations>,
}

impl HandlerDeps {
    /// Create new handler dependencies with an empty conversation table
    pub fn new(db_pool: Arc<DbPool>, settings: Arc<Settings>) -> Self {
        let conversations = Arc::new(Conversations::new(settings.session_ttl));
        Self {
            db_pool,
            settings,
            conversations,
        }
    }

    pub fn is_admin(&self, user: &User) -> bool {
        telegram_id(user).is_some_and(|id| self.settings.is_admin(id))
    }
}

/// Telegram user id as stored in the database
pub fn telegram_id(user: &User) -> Option<i64> {
    i64::try_from(user.id.0).ok()
}
