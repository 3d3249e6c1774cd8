//! In-memory favorites set

use std::collections::BTreeSet;

/// Dog ids the user has marked, kept for the lifetime of a search session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it otherwise. Returns whether it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Ids in stable order, as sent to the match endpoint
    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}
