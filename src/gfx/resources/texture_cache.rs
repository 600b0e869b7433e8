use std::{collections::HashMap, rc::Rc};

use log::debug;

/// Textures loaded so far, keyed by the path written in the source asset
///
/// A texture referenced by several meshes is loaded once and shared. Failed
/// loads are not remembered, so a later request retries.
pub struct TextureCache<T> {
    entries: HashMap<String, Rc<T>>,
}

impl<T> TextureCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Rc<T>> {
        self.entries.get(key).cloned()
    }

    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: &str,
        load: impl FnOnce() -> Result<T, E>,
    ) -> Result<Rc<T>, E> {
        if let Some(existing) = self.entries.get(key) {
            debug!("Texture cache hit for {}", key);
            return Ok(Rc::clone(existing));
        }
        let loaded = Rc::new(load()?);
        self.entries.insert(key.to_string(), Rc::clone(&loaded));
        Ok(loaded)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TextureCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
