//! Ordered edit history of one image.
//!
//! Edits are stored in insertion order, but replay always follows
//! [`EditHistory::ordered_for_replay`]: ascending creation time, ties
//! broken by id. Appending the same set of edits in any order therefore
//! composites to the same pixels.

use crate::edit::Edit;

/// Edits applied to one image.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EditHistory {
    edits: Vec<Edit>,
}

impl EditHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an edit.
    pub fn append(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Removes the edit with `id`, returning it. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Edit> {
        let idx = self.edits.iter().position(|e| e.id() == id)?;
        Some(self.edits.remove(idx))
    }

    /// Removes every edit.
    pub fn clear(&mut self) {
        self.edits.clear();
    }

    /// Edits in replay order.
    pub fn ordered_for_replay(&self) -> Vec<&Edit> {
        let mut ordered: Vec<&Edit> = self.edits.iter().collect();
        ordered.sort_by(|a, b| a.replay_key().cmp(&b.replay_key()));
        ordered
    }

    /// Number of edits.
    #[inline]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns `true` if there are no edits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Returns `true` if the image differs from its original, i.e. the
    /// history holds at least one edit.
    #[inline]
    pub fn is_edited(&self) -> bool {
        !self.is_empty()
    }

    /// Edits in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Edit> {
        self.edits.iter()
    }

    /// Looks up an edit by id.
    pub fn get(&self, id: &str) -> Option<&Edit> {
        self.edits.iter().find(|e| e.id() == id)
    }

    /// The edit replayed last.
    pub fn last(&self) -> Option<&Edit> {
        self.edits.iter().max_by(|a, b| a.replay_key().cmp(&b.replay_key()))
    }

    /// Removes and returns the edit replayed last.
    pub fn pop(&mut self) -> Option<Edit> {
        let idx = self
            .edits
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.replay_key().cmp(&b.replay_key()))
            .map(|(i, _)| i)?;
        Some(self.edits.remove(idx))
    }

    /// Returns `true` if `edit` would replay after every edit already here.
    pub fn sorts_last(&self, edit: &Edit) -> bool {
        self.last().is_none_or(|last| last.replay_key() < edit.replay_key())
    }
}

impl FromIterator<Edit> for EditHistory {
    fn from_iter<I: IntoIterator<Item = Edit>>(iter: I) -> Self {
        Self {
            edits: iter.into_iter().collect(),
        }
    }
}

impl Extend<Edit> for EditHistory {
    fn extend<I: IntoIterator<Item = Edit>>(&mut self, iter: I) {
        self.edits.extend(iter);
    }
}

impl<'a> IntoIterator for &'a EditHistory {
    type Item = &'a Edit;
    type IntoIter = std::slice::Iter<'a, Edit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}
