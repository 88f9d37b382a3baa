//! Immutable note snapshots joined lazily to their type and children.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::element_type::ElementType;
use crate::error::NoteError;
use crate::loader::NoteRecordLoader;
use crate::record::{NoteRecord, NoteView};

/// A read-only view of one note.
///
/// [`note_type`](Self::note_type) and [`children`](Self::children) ask the
/// loader on every call; nothing is cached, so two calls may observe
/// different records if the loader's backing store changed in between.
#[derive(Clone)]
pub struct NoteModel {
    record: NoteRecord,
    loader: Arc<dyn NoteRecordLoader>,
}

impl NoteModel {
    pub fn new(record: NoteRecord, loader: Arc<dyn NoteRecordLoader>) -> Self {
        Self { record, loader }
    }

    /// Copies `record` so later changes to the caller's record do not reach
    /// the snapshot.
    pub fn from_record(record: &NoteRecord, loader: Arc<dyn NoteRecordLoader>) -> Self {
        Self::new(record.clone(), loader)
    }

    /// Loads `id` and wraps it with `loader`.
    pub fn load(id: &str, loader: Arc<dyn NoteRecordLoader>) -> Result<Self, NoteError> {
        let record = loader.load_note_record(id)?;
        Ok(Self::new(record, loader))
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn value(&self) -> &str {
        &self.record.value
    }

    pub fn element_type(&self) -> ElementType {
        self.record.element_type
    }

    pub fn note_type_id(&self) -> &str {
        &self.record.note_type_id
    }

    pub fn children_ids(&self) -> &[String] {
        &self.record.children_ids
    }

    /// A short label for the note: the first four chars of its id.
    pub fn short_name(&self) -> &str {
        match self.record.id.char_indices().nth(4) {
            Some((at, _)) => &self.record.id[..at],
            None => &self.record.id,
        }
    }

    pub fn record(&self) -> &NoteRecord {
        &self.record
    }

    pub fn to_record(&self) -> NoteRecord {
        self.record.clone()
    }

    pub fn loader(&self) -> &Arc<dyn NoteRecordLoader> {
        &self.loader
    }

    /// Resolves the note's type. `Ok(None)` when the note is untyped.
    pub fn note_type(&self) -> Result<Option<NoteModel>, NoteError> {
        if self.record.note_type_id.is_empty() {
            return Ok(None);
        }
        trace!(id = %self.record.id, note_type = %self.record.note_type_id, "resolving note type");
        self.resolve(&self.record.note_type_id).map(Some)
    }

    /// Resolves every child in order. Fails on the first child the loader
    /// cannot resolve.
    pub fn children(&self) -> Result<Vec<NoteModel>, NoteError> {
        trace!(id = %self.record.id, count = self.record.children_ids.len(), "resolving children");
        self.record
            .children_ids
            .iter()
            .map(|id| self.resolve(id))
            .collect()
    }

    fn resolve(&self, id: &str) -> Result<NoteModel, NoteError> {
        let record = self.loader.load_note_record(id)?;
        Ok(NoteModel::new(record, Arc::clone(&self.loader)))
    }
}

impl NoteView for NoteModel {
    fn id(&self) -> &str {
        NoteModel::id(self)
    }

    fn value(&self) -> &str {
        NoteModel::value(self)
    }

    fn element_type(&self) -> ElementType {
        NoteModel::element_type(self)
    }

    fn note_type_id(&self) -> &str {
        NoteModel::note_type_id(self)
    }

    fn children_ids(&self) -> &[String] {
        NoteModel::children_ids(self)
    }
}

impl fmt::Debug for NoteModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteModel")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl PartialEq for NoteModel {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}
