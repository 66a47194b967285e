use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

/// In-memory page sessions keyed by id. Each session sits behind its own
/// mutex so one slow handler never blocks other sessions.
pub struct SessionStore<T> {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<T>>>>>,
}

impl<T> SessionStore<T> {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn create(&self, session: T) -> (Uuid, Arc<Mutex<T>>) {
        let session_id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(session));

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id, Arc::clone(&session));

        debug!("Created session {}", session_id);
        (session_id, session)
    }

    pub async fn get(&self, session_id: Uuid) -> Option<Arc<Mutex<T>>> {
        let sessions = self.sessions.read().await;
        sessions.get(&session_id).cloned()
    }

    pub async fn remove(&self, session_id: Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(&session_id).is_some();
        if removed {
            debug!("Removed session {}", session_id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
        }
    }
}
