//! Record lookup used by [`NoteModel`](crate::NoteModel) to resolve ids.

use indexmap::IndexMap;
use tracing::trace;

use crate::error::NoteError;
use crate::record::NoteRecord;

/// Resolves a note id to its record.
///
/// Implementations should return the same record for the same id within one
/// session, and [`NoteError::NotFound`] for unknown ids. Loaders are shared
/// by snapshots that may cross threads, hence the `Send + Sync` bound.
pub trait NoteRecordLoader: Send + Sync {
    fn load_note_record(&self, id: &str) -> Result<NoteRecord, NoteError>;
}

impl<F> NoteRecordLoader for F
where
    F: Fn(&str) -> Result<NoteRecord, NoteError> + Send + Sync,
{
    fn load_note_record(&self, id: &str) -> Result<NoteRecord, NoteError> {
        self(id)
    }
}

/// In-memory record store, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    records: IndexMap<String, NoteRecord>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under its id, returning the record it replaced.
    pub fn insert(&mut self, record: NoteRecord) -> Option<NoteRecord> {
        self.records.insert(record.id.clone(), record)
    }

    pub fn get(&self, id: &str) -> Option<&NoteRecord> {
        self.records.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<NoteRecord> {
        self.records.shift_remove(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteRecord> {
        self.records.values()
    }

    /// Writes back records produced by
    /// [`NoteMapDelta::apply`](crate::NoteMapDelta::apply).
    pub fn commit(&mut self, records: IndexMap<String, NoteRecord>) {
        for (id, record) in records {
            self.records.insert(id, record);
        }
    }
}

impl NoteRecordLoader for MemoryLoader {
    fn load_note_record(&self, id: &str) -> Result<NoteRecord, NoteError> {
        trace!(id, "loading note record");
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| NoteError::NotFound(id.to_string()))
    }
}

impl FromIterator<NoteRecord> for MemoryLoader {
    fn from_iter<I: IntoIterator<Item = NoteRecord>>(iter: I) -> Self {
        let mut loader = MemoryLoader::new();
        for record in iter {
            loader.insert(record);
        }
        loader
    }
}
