use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;
use uuid::Uuid;

use crate::interview::session::Session;

struct Entry {
    session: Arc<Mutex<Session>>,
    last_seen: Instant,
}

/// In-memory session registry. Each session sits behind its own mutex so a single
/// request owns it for the whole controller call; sessions never contend with each other.
///
/// Sessions not touched for the configured TTL are evicted by a background sweep,
/// finished interviews included.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Entry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: Session) {
        let id = session.id;
        let entry = Entry {
            session: Arc::new(Mutex::new(session)),
            last_seen: Instant::now(),
        };
        self.sessions.lock().await.insert(id, entry);
    }

    /// Handle to a session's slot; lock it to read or replace the session.
    /// Counts as activity for eviction.
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.lock().await.remove(&id).is_some()
    }

    /// Drops sessions idle for at least `ttl`. A session whose handle is still held by
    /// a request is kept. Returns the number evicted.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            Arc::strong_count(&entry.session) > 1 || now.duration_since(entry.last_seen) < ttl
        });
        before - sessions.len()
    }

    /// Runs `evict_idle` every `every` until the returned task is aborted.
    pub fn spawn_eviction(&self, ttl: Duration, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(ttl).await;
                if evicted > 0 {
                    info!("Evicted {evicted} idle interview sessions");
                }
            }
        })
    }
}
