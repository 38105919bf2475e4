//! Registry of caught Pokemon.

use std::collections::BTreeMap;

use crate::api::Pokemon;

/// Caught Pokemon keyed by name, owned by one shell session.
#[derive(Debug, Clone, Default)]
pub struct Pokedex {
    caught: BTreeMap<String, Pokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch. Returns false if the Pokemon was already registered.
    pub fn insert(&mut self, pokemon: Pokemon) -> bool {
        if self.caught.contains_key(&pokemon.name) {
            return false;
        }
        self.caught.insert(pokemon.name.clone(), pokemon);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Pokemon> {
        self.caught.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.caught.contains_key(name)
    }

    /// Caught names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.caught.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }
}
