//! Note records and the deltas that edit them.
//!
//! - [`NoteRecord`] is the plain record exchanged with storage and editors.
//! - [`NoteModel`] is an immutable view of a record whose type and children
//!   are resolved on demand through a [`NoteRecordLoader`].
//! - [`NoteDelta`] edits one note: its value through a
//!   [`TextDelta`](notemaps_delta::TextDelta), and its element type and type
//!   reference by replacement.
//! - [`NoteMapDelta`] batches note deltas for several notes.

pub mod element_type;
pub mod error;
pub mod loader;
pub mod model;
pub mod note_delta;
pub mod note_map_delta;
pub mod record;

pub use element_type::ElementType;
pub use error::NoteError;
pub use loader::{MemoryLoader, NoteRecordLoader};
pub use model::NoteModel;
pub use note_delta::NoteDelta;
pub use note_map_delta::NoteMapDelta;
pub use record::{NoteRecord, NoteView};

pub use notemaps_delta::{DeltaError, Op, TextDelta};
