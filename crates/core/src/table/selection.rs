//! Cross-page row selection.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

/// Selected row identities, independent of the visible page.
///
/// Membership is a plain set; iteration follows insertion order so bulk
/// actions can run in the order the user picked rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Flips membership of `id`. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.insert(id);
            true
        }
    }

    /// Whether every id of a non-empty visible page is selected.
    pub fn all_selected<S: AsRef<str>>(&self, visible_ids: &[S]) -> bool {
        !visible_ids.is_empty() && visible_ids.iter().all(|id| self.contains(id.as_ref()))
    }

    /// Header checkbox: deselects exactly the visible ids if all of them are
    /// selected, otherwise selects all of them. Ids on other pages are never
    /// touched. Returns whether the visible ids ended up selected.
    pub fn toggle_all_visible<S: AsRef<str>>(&mut self, visible_ids: &[S]) -> bool {
        if visible_ids.is_empty() {
            return false;
        }

        if self.all_selected(visible_ids) {
            for id in visible_ids {
                self.remove(id.as_ref());
            }
            false
        } else {
            for id in visible_ids {
                self.insert(id.as_ref());
            }
            true
        }
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    fn insert(&mut self, id: &str) {
        if self.members.insert(id.to_string()) {
            self.order.push(id.to_string());
        }
    }

    fn remove(&mut self, id: &str) -> bool {
        if self.members.remove(id) {
            self.order.retain(|existing| existing != id);
            true
        } else {
            false
        }
    }
}

impl Serialize for SelectionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}
