use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::Backend;
use crate::error::Result;

/// Process-local backend, for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryBackend {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn documents(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.documents.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Backend for MemoryBackend {
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn read(&self, kind: &str) -> Result<Option<String>> {
        Ok(self.documents().get(kind).cloned())
    }

    fn write(&self, kind: &str, document: &str) -> Result<()> {
        self.documents()
            .insert(kind.to_string(), document.to_string());
        Ok(())
    }

    fn remove(&self, kind: &str) -> Result<bool> {
        Ok(self.documents().remove(kind).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.read("store_shops").unwrap(), None);

        backend.write("store_shops", "[]").unwrap();
        assert_eq!(backend.read("store_shops").unwrap().as_deref(), Some("[]"));

        assert!(backend.remove("store_shops").unwrap());
        assert!(!backend.remove("store_shops").unwrap());
    }
}
