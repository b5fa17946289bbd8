use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use uuid::Uuid;

use crate::{
    domain::{ClassificationResult, Submission},
    view::{ClassificationForm, SubmitRejected, Ticket},
};

#[derive(Debug)]
struct SessionEntry {
    form: ClassificationForm,
    touched: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            form: ClassificationForm::new(),
            touched: Instant::now(),
        }
    }
}

pub const DEFAULT_CAPACITY: usize = 10_000;

/// In-memory visitor forms keyed by session id. Nothing is persisted.
#[derive(Debug)]
pub struct SessionStore {
    entries: Mutex<HashMap<Uuid, SessionEntry>>,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SessionStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Copy of the visitor's form, refreshing its idle timer.
    pub fn snapshot(&self, id: &Uuid) -> Option<ClassificationForm> {
        let mut entries = self.entries.lock();
        entries.get_mut(id).map(|entry| {
            entry.touched = Instant::now();
            entry.form.clone()
        })
    }

    /// Starts a submission on the given session, creating one when the id is
    /// absent or unknown.
    pub fn begin_submit(
        &self,
        id: Option<Uuid>,
        email: String,
        message: String,
    ) -> (Uuid, Result<(Ticket, Submission), SubmitRejected>) {
        let mut entries = self.entries.lock();
        let id = match id.filter(|id| entries.contains_key(id)) {
            Some(id) => id,
            None => {
                if entries.len() >= self.capacity {
                    evict_one(&mut entries);
                }
                Uuid::new_v4()
            }
        };
        let entry = entries.entry(id).or_insert_with(SessionEntry::new);
        entry.touched = Instant::now();
        (id, entry.form.begin_submit(email, message))
    }

    /// Returns false when the session is gone or the ticket is stale.
    pub fn settle(&self, id: &Uuid, ticket: Ticket, result: ClassificationResult) -> bool {
        let mut entries = self.entries.lock();
        match entries.get_mut(id) {
            Some(entry) => entry.form.settle(ticket, result),
            None => false,
        }
    }

    /// Drops sessions idle for longer than `ttl` and returns how many were removed.
    pub fn sweep(&self, ttl: Duration) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.touched.elapsed() <= ttl);
        before - entries.len()
    }
}

/// Drops the least recently touched session, preferring settled ones.
fn evict_one(entries: &mut HashMap<Uuid, SessionEntry>) {
    let victim = entries
        .iter()
        .min_by_key(|(_, entry)| (entry.form.is_loading(), entry.touched))
        .map(|(id, _)| *id);
    if let Some(id) = victim {
        entries.remove(&id);
        tracing::debug!(target: "sessions", session = %id, "session evicted at capacity");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_gets_a_fresh_session() {
        let store = SessionStore::default();
        let stale = Uuid::new_v4();
        let (id, outcome) = store.begin_submit(Some(stale), "a@b.c".into(), "oi".into());
        assert_ne!(id, stale);
        assert!(outcome.is_ok());
        assert_eq!(store.len(), 1);
        assert!(store.snapshot(&id).unwrap().is_loading());
    }

    #[test]
    fn settle_reaches_the_right_session() {
        let store = SessionStore::default();
        let (first, a) = store.begin_submit(None, "a@b.c".into(), "um".into());
        let (second, b) = store.begin_submit(None, "d@e.f".into(), "dois".into());
        let (ticket_a, _) = a.unwrap();
        let (ticket_b, _) = b.unwrap();

        assert!(store.settle(&first, ticket_a, ClassificationResult::new("venda", 0.7)));
        assert!(store.snapshot(&second).unwrap().is_loading());
        assert!(store.settle(&second, ticket_b, ClassificationResult::error()));
        assert_eq!(
            store.snapshot(&first).unwrap().result().unwrap().category,
            "venda"
        );
    }

    #[test]
    fn second_submit_on_same_session_is_rejected_while_pending() {
        let store = SessionStore::default();
        let (id, first) = store.begin_submit(None, "a@b.c".into(), "um".into());
        assert!(first.is_ok());
        let (same, second) = store.begin_submit(Some(id), "a@b.c".into(), "dois".into());
        assert_eq!(same, id);
        assert_eq!(second, Err(SubmitRejected));
    }

    #[test]
    fn capacity_evicts_oldest_settled_session_first() {
        let store = SessionStore::with_capacity(2);
        let (settled, outcome) = store.begin_submit(None, "a@b.c".into(), "um".into());
        let (ticket, _) = outcome.unwrap();
        assert!(store.settle(&settled, ticket, ClassificationResult::new("venda", 0.7)));
        std::thread::sleep(Duration::from_millis(2));
        let (pending, _) = store.begin_submit(None, "d@e.f".into(), "dois".into());
        std::thread::sleep(Duration::from_millis(2));
        let (newest, _) = store.begin_submit(None, "g@h.i".into(), "tres".into());

        assert_eq!(store.len(), 2);
        assert!(store.snapshot(&settled).is_none());
        assert!(store.snapshot(&pending).is_some());
        assert!(store.snapshot(&newest).is_some());

        let (_, _) = store.begin_submit(None, "j@k.l".into(), "quatro".into());
        assert_eq!(store.len(), 2);
        assert!(store.snapshot(&pending).is_none());
    }

    #[test]
    fn existing_session_does_not_trigger_eviction() {
        let store = SessionStore::with_capacity(1);
        let (id, outcome) = store.begin_submit(None, "a@b.c".into(), "um".into());
        let (ticket, _) = outcome.unwrap();
        assert!(store.settle(&id, ticket, ClassificationResult::error()));

        let (same, again) = store.begin_submit(Some(id), "a@b.c".into(), "dois".into());
        assert_eq!(same, id);
        assert!(again.is_ok());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sweep_removes_idle_sessions_and_drops_late_settles() {
        let store = SessionStore::default();
        let (id, outcome) = store.begin_submit(None, "a@b.c".into(), "oi".into());
        let (ticket, _) = outcome.unwrap();

        assert_eq!(store.sweep(Duration::from_secs(3_600)), 0);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.sweep(Duration::ZERO), 1);
        assert_eq!(store.len(), 0);
        assert!(!store.settle(&id, ticket, ClassificationResult::error()));
    }
}
