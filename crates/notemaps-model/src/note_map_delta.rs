//! Batches of note deltas spanning several notes.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::NoteError;
use crate::loader::NoteRecordLoader;
use crate::note_delta::NoteDelta;
use crate::record::NoteRecord;

/// One [`NoteDelta`] per note, kept in the order each note was first edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMapDelta {
    deltas: IndexMap<String, NoteDelta>,
}

impl NoteMapDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta`, merging it after any delta already held for that note.
    pub fn edit(mut self, delta: NoteDelta) -> Self {
        self.push(delta);
        self
    }

    pub fn push(&mut self, delta: NoteDelta) {
        match self.deltas.get_mut(delta.id()) {
            Some(held) => {
                let earlier = std::mem::replace(held, NoteDelta::new(delta.id()));
                *held = earlier.merge(delta);
            }
            None => {
                self.deltas.insert(delta.id().to_string(), delta);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&NoteDelta> {
        self.deltas.get(id)
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteDelta> {
        self.deltas.values()
    }

    /// Loads every target note and applies its delta.
    ///
    /// Fails on the first note the loader cannot resolve; no partial result
    /// is returned.
    pub fn apply(
        &self,
        loader: &dyn NoteRecordLoader,
    ) -> Result<IndexMap<String, NoteRecord>, NoteError> {
        debug!(notes = self.deltas.len(), "applying note map delta");
        self.deltas
            .iter()
            .map(|(id, delta)| {
                let prev = loader.load_note_record(id)?;
                Ok((id.clone(), delta.apply(&prev)))
            })
            .collect()
    }

    /// Like [`apply`](Self::apply), but value edits must stay within each
    /// note's current value.
    pub fn try_apply(
        &self,
        loader: &dyn NoteRecordLoader,
    ) -> Result<IndexMap<String, NoteRecord>, NoteError> {
        debug!(notes = self.deltas.len(), "applying note map delta strictly");
        self.deltas
            .iter()
            .map(|(id, delta)| {
                let prev = loader.load_note_record(id)?;
                Ok((id.clone(), delta.try_apply(&prev)?))
            })
            .collect()
    }
}

impl FromIterator<NoteDelta> for NoteMapDelta {
    fn from_iter<I: IntoIterator<Item = NoteDelta>>(iter: I) -> Self {
        let mut map = NoteMapDelta::new();
        for delta in iter {
            map.push(delta);
        }
        map
    }
}
