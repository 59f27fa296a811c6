//! Decoded-image cache keyed by source URL.
//!
//! Loads complete asynchronously and in any order; each completion only
//! touches its own entry. Until an entry is ready the renderer skips it. A
//! failed entry stays failed (the item remains in the document) until it is
//! forgotten, after which the next request starts a fresh load.

#[cfg(test)]
#[path = "images_test.rs"]
mod images_test;

use std::collections::HashMap;

/// Load state of one image.
#[derive(Debug, Clone)]
pub enum ImageSlot<T> {
    Loading,
    Ready(T),
    Failed,
}

/// Cache of decoded images, generic over the platform image handle.
#[derive(Debug)]
pub struct ImageCache<T> {
    slots: HashMap<String, ImageSlot<T>>,
    changed: bool,
}

impl<T> Default for ImageCache<T> {
    fn default() -> Self {
        Self { slots: HashMap::new(), changed: false }
    }
}

impl<T> ImageCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `src`. Returns `true` if the caller should start
    /// a load (first request, or the entry was forgotten).
    pub fn request(&mut self, src: &str) -> bool {
        if self.slots.contains_key(src) {
            return false;
        }
        self.slots.insert(src.to_string(), ImageSlot::Loading);
        true
    }

    /// Store a decoded image. Ignored if the entry was forgotten meanwhile.
    pub fn mark_ready(&mut self, src: &str, image: T) {
        if let Some(slot) = self.slots.get_mut(src) {
            *slot = ImageSlot::Ready(image);
            self.changed = true;
        }
    }

    /// Record a decode failure.
    pub fn mark_failed(&mut self, src: &str) {
        if let Some(slot) = self.slots.get_mut(src) {
            log::warn!("image failed to load: {src}");
            *slot = ImageSlot::Failed;
        }
    }

    /// Drop an entry so the next request reloads it.
    pub fn forget(&mut self, src: &str) {
        self.slots.remove(src);
    }

    /// Forget every failed entry. Returns how many were dropped.
    pub fn retry_failed(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| !matches!(slot, ImageSlot::Failed));
        before - self.slots.len()
    }

    /// The decoded image, if ready.
    #[must_use]
    pub fn get(&self, src: &str) -> Option<&T> {
        match self.slots.get(src) {
            Some(ImageSlot::Ready(image)) => Some(image),
            _ => None,
        }
    }

    #[must_use]
    pub fn slot(&self, src: &str) -> Option<&ImageSlot<T>> {
        self.slots.get(src)
    }

    /// Whether any image became ready since the last call.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}
