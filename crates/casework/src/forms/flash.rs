use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::forms::domain::PageInput;
use crate::forms::page::FieldErrors;

/// Validation errors plus the input that produced them, carried across
/// one redirect and no further.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlashEntry {
    pub errors: FieldErrors,
    pub input: PageInput,
}

/// Short-lived request-crossing state with an explicit lifecycle:
/// written on validation failure, read and cleared on the next render.
pub trait FlashStore: Send + Sync {
    /// Stores the entry and returns the correlation token to key the
    /// redirect with.
    fn put(&self, entry: FlashEntry) -> String;

    /// One-shot read; the entry is gone afterwards.
    fn take(&self, token: &str) -> Option<FlashEntry>;
}

static FLASH_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_flash_token() -> String {
    let id = FLASH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("flash-{id:06}")
}

#[derive(Debug, Default)]
pub struct InMemoryFlashStore {
    entries: Mutex<HashMap<String, FlashEntry>>,
}

impl FlashStore for InMemoryFlashStore {
    fn put(&self, entry: FlashEntry) -> String {
        let token = next_flash_token();
        let mut guard = self.entries.lock().expect("flash mutex poisoned");
        guard.insert(token.clone(), entry);
        token
    }

    fn take(&self, token: &str) -> Option<FlashEntry> {
        let mut guard = self.entries.lock().expect("flash mutex poisoned");
        guard.remove(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn take_clears_the_entry() {
        let store = InMemoryFlashStore::default();
        let mut errors = FieldErrors::new();
        errors.insert("field".to_string(), "message".to_string());
        let input = PageInput::from_value(&json!({ "field": "typed" }));

        let token = store.put(FlashEntry {
            errors: errors.clone(),
            input: input.clone(),
        });

        let entry = store.take(&token).expect("entry present");
        assert_eq!(entry.errors, errors);
        assert_eq!(entry.input, input);
        assert!(store.take(&token).is_none());
    }

    #[test]
    fn tokens_are_unique_per_entry() {
        let store = InMemoryFlashStore::default();
        let first = store.put(FlashEntry::default());
        let second = store.put(FlashEntry::default());
        assert_ne!(first, second);
    }

    #[test]
    fn unknown_token_yields_nothing() {
        let store = InMemoryFlashStore::default();
        assert!(store.take("flash-999999").is_none());
    }
}
