//! Persisted list of flyover addresses.
//!
//! The whole list lives under a single key so it reloads exactly as the
//! user last typed it, blanks included.

use std::path::Path;
use thiserror::Error;
use tracing::debug;

const ADDRESSES_KEY: &[u8] = b"addresses";

/// Address book storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupt address list: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Sled-backed address list.
pub struct AddressBook {
    db: sled::Db,
}

impl AddressBook {
    /// Open a persistent address book at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)
            .map_err(|e| StoreError::Storage(format!("Failed to open sled DB: {}", e)))?;
        Ok(Self { db })
    }

    /// Create a throwaway address book that is deleted on drop
    pub fn open_temporary() -> Result<Self, StoreError> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| StoreError::Storage(format!("Failed to open temp DB: {}", e)))?;
        Ok(Self { db })
    }

    /// Loads the saved addresses, or two blank entries if nothing was saved.
    pub fn load(&self) -> Result<Vec<String>, StoreError> {
        let raw = self
            .db
            .get(ADDRESSES_KEY)
            .map_err(|e| StoreError::Storage(format!("Read failed: {}", e)))?;

        match raw {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(vec![String::new(), String::new()]),
        }
    }

    /// Replaces the saved list.
    pub fn save<S: AsRef<str>>(&self, addresses: &[S]) -> Result<(), StoreError> {
        let list: Vec<&str> = addresses.iter().map(|a| a.as_ref()).collect();
        let bytes = serde_json::to_vec(&list)?;

        self.db
            .insert(ADDRESSES_KEY, bytes)
            .map_err(|e| StoreError::Storage(format!("Insert failed: {}", e)))?;
        self.db
            .flush()
            .map_err(|e| StoreError::Storage(format!("Flush failed: {}", e)))?;

        debug!("Saved {} addresses", list.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_book_has_two_blank_entries() {
        let book = AddressBook::open_temporary().unwrap();
        assert_eq!(book.load().unwrap(), vec!["", ""]);
    }

    #[test]
    fn test_save_then_load_preserves_order_and_blanks() {
        let book = AddressBook::open_temporary().unwrap();
        book.save(&["1 Infinite Loop, Cupertino", "", "Golden Gate Bridge"]).unwrap();

        assert_eq!(
            book.load().unwrap(),
            vec!["1 Infinite Loop, Cupertino", "", "Golden Gate Bridge"]
        );

        book.save(&["Only one"]).unwrap();
        assert_eq!(book.load().unwrap(), vec!["Only one"]);
    }

    #[test]
    fn test_corrupt_entry_is_reported() {
        let book = AddressBook::open_temporary().unwrap();
        book.db.insert(ADDRESSES_KEY, b"not json".to_vec()).unwrap();

        assert!(matches!(book.load(), Err(StoreError::Corrupt(_))));
    }
}
