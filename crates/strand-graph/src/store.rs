//! Process-local persistence.
//!
//! A sled database with two logical keys: the entity collection and the
//! favorites set. Values are JSON-encoded. Loads are defensive: a missing
//! key yields the default, and a value that no longer decodes is purged
//! (the one-time incompatible-data reset) instead of failing the caller.

use sled::Db;
use std::path::Path;
use strand_core::{EntityId, Hairstyle};
use thiserror::Error;
use tracing::{debug, warn};

const CATALOG_KEY: &str = "catalog";
const FAVORITES_KEY: &str = "favorites";
const UNDO_KEY: &str = "undo";
const REDO_KEY: &str = "redo";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct CatalogStore {
    db: Db,
}

impl CatalogStore {
    /// Opens or creates a store at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Saves the entity collection under the catalog key.
    pub fn save_entities(&self, entities: &[Hairstyle]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(entities)?;
        self.db.insert(CATALOG_KEY, bytes)?;
        self.db.flush()?;
        Ok(())
    }

    /// Loads the entity collection, or an empty one when the key is
    /// missing or its value no longer decodes.
    pub fn load_entities(&self) -> Result<Vec<Hairstyle>, StoreError> {
        self.load_or_purge(CATALOG_KEY)
    }

    /// Saves the favorites set.
    pub fn save_favorites(&self, favorites: &[EntityId]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(favorites)?;
        self.db.insert(FAVORITES_KEY, bytes)?;
        self.db.flush()?;
        Ok(())
    }

    /// Loads the favorites set, defaulting to empty on missing or
    /// undecodable data.
    pub fn load_favorites(&self) -> Result<Vec<EntityId>, StoreError> {
        self.load_or_purge(FAVORITES_KEY)
    }

    /// Saves the editor's undo and redo snapshot stacks so history
    /// survives across invocations.
    pub fn save_history(
        &self,
        undo: &[Vec<Hairstyle>],
        redo: &[Vec<Hairstyle>],
    ) -> Result<(), StoreError> {
        self.db.insert(UNDO_KEY, serde_json::to_vec(undo)?)?;
        self.db.insert(REDO_KEY, serde_json::to_vec(redo)?)?;
        self.db.flush()?;
        Ok(())
    }

    /// Loads the undo and redo snapshot stacks, each defaulting to empty.
    pub fn load_history(&self) -> Result<(Vec<Vec<Hairstyle>>, Vec<Vec<Hairstyle>>), StoreError> {
        Ok((self.load_or_purge(UNDO_KEY)?, self.load_or_purge(REDO_KEY)?))
    }

    /// True when the catalog key has ever been written.
    pub fn is_initialized(&self) -> Result<bool, StoreError> {
        Ok(self.db.contains_key(CATALOG_KEY)?)
    }

    /// Clears every key, history included.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.db.remove(CATALOG_KEY)?;
        self.db.remove(FAVORITES_KEY)?;
        self.db.remove(UNDO_KEY)?;
        self.db.remove(REDO_KEY)?;
        self.db.flush()?;
        Ok(())
    }

    fn load_or_purge<T>(&self, key: &str) -> Result<T, StoreError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let Some(bytes) = self.db.get(key)? else {
            debug!(key, "no stored value, using default");
            return Ok(T::default());
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(key, %err, "stored value is incompatible, purging");
                self.db.remove(key)?;
                self.db.flush()?;
                Ok(T::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_core::{Relation, Role};
    use tempfile::tempdir;

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();

        let mut entity = Hairstyle::new(1, "Fade", "The fade family");
        entity.relation = Some(Relation::empty(Role::Parent));
        store.save_entities(&[entity.clone()]).unwrap();
        store.save_favorites(&[1]).unwrap();

        let entities = store.load_entities().unwrap();
        assert_eq!(entities, vec![entity]);
        assert_eq!(store.load_favorites().unwrap(), vec![1]);
    }

    #[test]
    fn test_missing_keys_yield_defaults() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();

        assert!(store.load_entities().unwrap().is_empty());
        assert!(store.load_favorites().unwrap().is_empty());
        assert!(!store.is_initialized().unwrap());
    }

    #[test]
    fn test_history_round_trip() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();

        let (undo, redo) = store.load_history().unwrap();
        assert!(undo.is_empty() && redo.is_empty());

        let snapshot = vec![Hairstyle::new(1, "Fade", "")];
        store.save_history(&[snapshot.clone()], &[]).unwrap();

        let (undo, redo) = store.load_history().unwrap();
        assert_eq!(undo, vec![snapshot]);
        assert!(redo.is_empty());
    }

    #[test]
    fn test_corrupt_value_is_purged() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();

        store.db.insert(CATALOG_KEY, b"not json".to_vec()).unwrap();
        assert!(store.load_entities().unwrap().is_empty());
        // The bad value is gone, not just ignored.
        assert!(store.db.get(CATALOG_KEY).unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        store.save_entities(&[Hairstyle::new(1, "a", "b")]).unwrap();
        assert!(store.is_initialized().unwrap());

        store.clear().unwrap();
        assert!(!store.is_initialized().unwrap());
        assert!(store.load_entities().unwrap().is_empty());
    }
}
