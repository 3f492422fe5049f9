//! Liked and passed internships, kept across runs.

use crate::store::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};

/// Store key holding the deck.
pub const DECK_KEY: &str = "internship-deck";

/// Store key holding the domain from the most recent assessment.
pub const LAST_DOMAIN_KEY: &str = "last-recommendation";

/// How the user has responded to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Liked,
    Passed,
}

/// Listing ids the user liked or passed on, in the order they did so.
/// An id is in at most one of the two lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipDeck {
    #[serde(default)]
    liked: Vec<String>,
    #[serde(default)]
    passed: Vec<String>,
}

impl InternshipDeck {
    pub fn load<S: KeyValueStore>(store: &S) -> Result<Self, StoreError> {
        Ok(store.get(DECK_KEY)?.unwrap_or_default())
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<(), StoreError> {
        store.set(DECK_KEY, self)
    }

    /// Mark `id` as liked; returns `false` if it already was.
    pub fn like(&mut self, id: &str) -> bool {
        self.passed.retain(|p| p != id);
        push_unique(&mut self.liked, id)
    }

    /// Mark `id` as passed; returns `false` if it already was.
    pub fn pass(&mut self, id: &str) -> bool {
        self.liked.retain(|l| l != id);
        push_unique(&mut self.passed, id)
    }

    pub fn status(&self, id: &str) -> Option<Swipe> {
        if self.liked.iter().any(|l| l == id) {
            Some(Swipe::Liked)
        } else if self.passed.iter().any(|p| p == id) {
            Some(Swipe::Passed)
        } else {
            None
        }
    }

    pub fn liked(&self) -> &[String] {
        &self.liked
    }

    pub fn passed(&self) -> &[String] {
        &self.passed
    }
}

fn push_unique(list: &mut Vec<String>, id: &str) -> bool {
    if list.iter().any(|existing| existing == id) {
        return false;
    }
    list.push(id.to_string());
    true
}
