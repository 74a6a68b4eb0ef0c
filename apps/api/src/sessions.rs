//! In-memory registry of open screens, keyed by id. Nothing is persisted.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

pub struct SessionStore<T> {
    sessions: RwLock<HashMap<Uuid, Arc<T>>>,
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> SessionStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: T) -> (Uuid, Arc<T>) {
        let id = Uuid::new_v4();
        let session = Arc::new(session);
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id, Arc::clone(&session));
        (id, session)
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<T>> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .cloned()
    }

    /// Drops the store's handle. Requests already holding the session finish normally.
    pub fn remove(&self, id: &Uuid) -> Option<Arc<T>> {
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(id)
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let store = SessionStore::new();
        let (id, session) = store.insert("screen".to_string());
        assert_eq!(*session, "screen");
        assert_eq!(store.get(&id).as_deref(), Some(&"screen".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_id() {
        let store: SessionStore<u8> = SessionStore::new();
        assert!(store.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_remove_forgets_session() {
        let store = SessionStore::new();
        let (id, held) = store.insert(7);
        let (other, _) = store.insert(8);

        assert_eq!(store.remove(&id).map(|s| *s), Some(7));
        assert!(store.get(&id).is_none());
        assert!(store.remove(&id).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&other).map(|s| *s), Some(8));
        assert_eq!(*held, 7);
    }

    #[test]
    fn test_ids_are_distinct() {
        let store = SessionStore::new();
        let (a, _) = store.insert(1);
        let (b, _) = store.insert(2);
        assert_ne!(a, b);
        assert_eq!(store.get(&a).map(|s| *s), Some(1));
    }
}
