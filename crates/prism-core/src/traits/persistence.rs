//! Object persistence trait and an in-memory implementation.

use std::sync::Mutex;

use crate::Result;

/// Stores a single object, such as the current session or the saved
/// credentials.
pub trait ObjectPersistence<T>: Send + Sync {
    /// Load the stored object, if any.
    fn load_item(&self) -> Result<Option<T>>;

    /// Store the object, replacing any previous one.
    fn save_item(&self, item: &T) -> Result<()>;

    /// Returns true if an object is stored.
    fn has_item(&self) -> bool;

    /// Remove the stored object.
    fn clear(&self) -> Result<()>;
}

/// Keeps the object in memory. Useful for anonymous sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryPersistence<T> {
    item: Mutex<Option<T>>,
}

impl<T> MemoryPersistence<T> {
    pub fn new() -> Self {
        Self {
            item: Mutex::new(None),
        }
    }

    pub fn with_item(item: T) -> Self {
        Self {
            item: Mutex::new(Some(item)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<T>> {
        // A panic while holding the lock cannot leave a half-written value.
        self.item.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone + Send> ObjectPersistence<T> for MemoryPersistence<T> {
    fn load_item(&self) -> Result<Option<T>> {
        Ok(self.slot().clone())
    }

    fn save_item(&self, item: &T) -> Result<()> {
        *self.slot() = Some(item.clone());
        Ok(())
    }

    fn has_item(&self) -> bool {
        self.slot().is_some()
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_persistence_round_trip() {
        let persistence = MemoryPersistence::<String>::new();
        assert!(!persistence.has_item());

        persistence.save_item(&"hello".to_string()).unwrap();
        assert!(persistence.has_item());
        assert_eq!(persistence.load_item().unwrap().as_deref(), Some("hello"));

        persistence.clear().unwrap();
        assert_eq!(persistence.load_item().unwrap(), None);
    }
}
