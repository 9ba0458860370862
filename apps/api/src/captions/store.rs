//! In-memory session registry for the HTTP API.
//!
//! Sessions live until they are deleted, sit idle longer than the store's TTL, or the
//! process exits. Each session sits behind its own async mutex; the mutex is never held
//! while the caption backend is working.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::captions::error::{CaptionError, ServiceError};
use crate::captions::service::CaptionService;
use crate::captions::session::{CaptionSession, ContentCheck};

pub struct SessionHandle {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub session: Mutex<CaptionSession>,
    last_used: StdMutex<Instant>,
}

impl SessionHandle {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            session: Mutex::new(CaptionSession::new()),
            last_used: StdMutex::new(Instant::now()),
        }
    }

    fn touch(&self) {
        *self
            .last_used
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_used
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .elapsed()
    }

    /// Generates captions for the current content; blank content is a `Validation` error.
    pub async fn generate(
        self: Arc<Self>,
        service: Arc<dyn CaptionService>,
    ) -> Result<(), CaptionError> {
        self.run(service, ContentCheck::Required).await
    }

    /// Same as `generate` without the content check.
    pub async fn regenerate(
        self: Arc<Self>,
        service: Arc<dyn CaptionService>,
    ) -> Result<(), CaptionError> {
        self.run(service, ContentCheck::Skip).await
    }

    /// The backend call runs in its own task, so the session's loading state still settles
    /// when the caller stops waiting (e.g. the HTTP client disconnects).
    async fn run(
        self: Arc<Self>,
        service: Arc<dyn CaptionService>,
        check: ContentCheck,
    ) -> Result<(), CaptionError> {
        let ticket = self.session.lock().await.begin_generation(check)?;
        let seq = ticket.seq();

        info!(
            "Session {} generation #{} started (backend: {})",
            self.id,
            seq,
            service.backend_name()
        );

        let handle = Arc::clone(&self);
        let task = tokio::spawn(async move {
            let outcome = service
                .generate(ticket.request())
                .await
                .map(|batch| batch.captions);
            let mut session = handle.session.lock().await;
            let stored = session
                .complete_generation(ticket, outcome)
                .map(|captions| captions.len());
            handle.touch();
            stored
        });

        match task.await {
            Ok(Ok(count)) => {
                info!("Session {} generation #{} stored {} captions", self.id, seq, count);
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(join_error) => {
                error!("Session {} generation #{} task failed: {join_error}", self.id, seq);
                self.session.lock().await.abandon_generation(seq);
                Err(CaptionError::Service(ServiceError::new(
                    "Caption generation was interrupted. Please try again.",
                )))
            }
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<SessionHandle>>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    /// Sessions untouched for longer than `idle_ttl` are dropped.
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    pub async fn create(&self) -> Arc<SessionHandle> {
        self.prune_expired().await;

        let handle = Arc::new(SessionHandle::new());
        self.sessions
            .write()
            .await
            .insert(handle.id, Arc::clone(&handle));
        handle
    }

    /// Looks up a live session and marks it as used. Expired sessions are evicted here
    /// if the sweeper has not reached them yet.
    pub async fn get(&self, id: Uuid) -> Option<Arc<SessionHandle>> {
        let handle = self.sessions.read().await.get(&id).cloned()?;

        if handle.idle_for() > self.idle_ttl {
            self.sessions.write().await.remove(&id);
            info!("Session {id} expired after {:?} idle", self.idle_ttl);
            return None;
        }

        handle.touch();
        Some(handle)
    }

    /// Returns false when no session had that id.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session idle for longer than the TTL. Returns how many were dropped.
    pub async fn prune_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| handle.idle_for() <= self.idle_ttl);
        before - sessions.len()
    }

    /// Starts a background task that prunes expired sessions every `every`.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();

        tokio::spawn(async move {
            let mut ticker = interval(every);
            info!(
                "Session sweeper started ({}s interval, {}s idle TTL)",
                every.as_secs(),
                store.idle_ttl.as_secs()
            );

            loop {
                ticker.tick().await;
                let removed = store.prune_expired().await;
                if removed > 0 {
                    info!("Evicted {removed} idle sessions");
                } else {
                    debug!("Session sweep found nothing to evict");
                }
            }
        })
    }
}
