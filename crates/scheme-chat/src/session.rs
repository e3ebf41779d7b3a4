//! In-memory session store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::error::ChatError;
use crate::types::ConversationContext;

/// Holds one [`ConversationContext`] per session id for the life of the
/// process.
///
/// Every call takes the lock for its own duration only. A dialogue turn
/// reads a snapshot with [`get_or_create`](Self::get_or_create), works on it
/// (pagination included) and writes it back with [`save`](Self::save). Two
/// turns racing on the same session are not serialised and the later save
/// wins. A session deleted while a turn is in flight comes back when that
/// turn saves.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, ConversationContext>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, ConversationContext>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|e| ChatError::State(format!("session lock poisoned: {}", e)))
    }

    /// Snapshot of the session, creating an empty one on first access.
    pub fn get_or_create(&self, session_id: &str) -> Result<ConversationContext, ChatError> {
        let mut sessions = self.lock()?;
        let ctx = sessions.entry(session_id.to_string()).or_insert_with(|| {
            debug!(session_id = %session_id, "Created session");
            ConversationContext::new(session_id)
        });
        Ok(ctx.clone())
    }

    /// Snapshot of an existing session.
    pub fn get(&self, session_id: &str) -> Result<Option<ConversationContext>, ChatError> {
        Ok(self.lock()?.get(session_id).cloned())
    }

    /// Store `ctx` under its session id, replacing what was there.
    pub fn save(&self, ctx: ConversationContext) -> Result<(), ChatError> {
        self.lock()?.insert(ctx.session_id.clone(), ctx);
        Ok(())
    }

    /// Remove the session. Returns whether it existed.
    pub fn delete(&self, session_id: &str) -> Result<bool, ChatError> {
        let removed = self.lock()?.remove(session_id).is_some();
        if removed {
            debug!(session_id = %session_id, "Deleted session");
        }
        Ok(removed)
    }

    /// Number of live sessions. A poisoned lock is logged and counts as 0.
    pub fn len(&self) -> usize {
        match self.lock() {
            Ok(sessions) => sessions.len(),
            Err(e) => {
                warn!(error = %e, "Session count unavailable");
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
