//! Persistence service: the one place that reads and writes durable state.
//!
//! DESIGN
//! ======
//! Three records live under fixed keys: the scene collection, the user's
//! uploaded backgrounds, and the welcome flag. Reads never fail the editor:
//! missing or malformed data is logged and replaced by the documented
//! fallback (one default scene, no uploads). Writes report errors so the
//! caller can log them and keep going.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::consts::{CUSTOM_BACKGROUNDS_KEY, SCENES_KEY, WELCOME_SEEN_KEY};
use crate::doc::{Background, Scene, SceneStore};
use crate::storage::{KeyValueStore, StorageError};

/// Typed load/save over a [`KeyValueStore`].
pub struct PersistenceService<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceService<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Scenes ---

    /// Load the scene collection. Falls back to one default scene when the
    /// record is missing, unreadable, or empty.
    #[must_use]
    pub fn load_scenes(&self) -> SceneStore {
        match self.read_json::<Vec<Scene>>(SCENES_KEY) {
            Ok(Some(scenes)) if !scenes.is_empty() => SceneStore::from_scenes(scenes),
            Ok(_) => SceneStore::new(),
            Err(e) => {
                log::error!("stored scenes unreadable, starting fresh: {e}");
                SceneStore::new()
            }
        }
    }

    /// Write the full scene collection.
    ///
    /// # Errors
    ///
    /// Serialization or backend failure.
    pub fn save_scenes(&mut self, scenes: &[Scene]) -> Result<(), StorageError> {
        self.write_json(SCENES_KEY, scenes)
    }

    // --- Custom backgrounds ---

    /// Load uploaded backgrounds, or none if the record is missing or unreadable.
    #[must_use]
    pub fn load_custom_backgrounds(&self) -> Vec<Background> {
        match self.read_json::<Vec<Background>>(CUSTOM_BACKGROUNDS_KEY) {
            Ok(backgrounds) => backgrounds.unwrap_or_default(),
            Err(e) => {
                log::error!("stored backgrounds unreadable, ignoring: {e}");
                Vec::new()
            }
        }
    }

    /// Append an uploaded background and return the updated collection.
    ///
    /// # Errors
    ///
    /// Serialization or backend failure; the stored collection is unchanged.
    pub fn add_custom_background(&mut self, background: Background) -> Result<Vec<Background>, StorageError> {
        let mut backgrounds = self.load_custom_backgrounds();
        backgrounds.push(background);
        self.write_json(CUSTOM_BACKGROUNDS_KEY, &backgrounds)?;
        Ok(backgrounds)
    }

    /// Remove an uploaded background by id, returning it if it was stored.
    ///
    /// # Errors
    ///
    /// Serialization or backend failure.
    pub fn remove_custom_background(&mut self, id: &str) -> Result<Option<Background>, StorageError> {
        let mut backgrounds = self.load_custom_backgrounds();
        let Some(idx) = backgrounds.iter().position(|bg| bg.id == id) else {
            return Ok(None);
        };
        let removed = backgrounds.remove(idx);
        self.write_json(CUSTOM_BACKGROUNDS_KEY, &backgrounds)?;
        Ok(Some(removed))
    }

    // --- Welcome flag ---

    #[must_use]
    pub fn has_seen_welcome(&self) -> bool {
        matches!(self.store.get(WELCOME_SEEN_KEY), Ok(Some(v)) if v == "true")
    }

    /// Record that the welcome flow was dismissed.
    ///
    /// # Errors
    ///
    /// Backend failure.
    pub fn mark_welcome_seen(&mut self) -> Result<(), StorageError> {
        self.store.set(WELCOME_SEEN_KEY, "true")
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}
