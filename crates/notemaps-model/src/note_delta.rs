//! Edits to a single note.

use notemaps_delta::TextDelta;

use crate::element_type::ElementType;
use crate::error::NoteError;
use crate::record::{NoteRecord, NoteView};

/// A change to one note: an optional value edit plus optional replacements
/// of the element type and type reference. Children are never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDelta {
    id: String,
    value_delta: Option<TextDelta>,
    element_type: Option<ElementType>,
    note_type_id: Option<String>,
}

impl NoteDelta {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value_delta: None,
            element_type: None,
            note_type_id: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds an edit of the value that runs after any edit already held.
    pub fn edit_value(mut self, delta: TextDelta) -> Self {
        self.value_delta = Some(match self.value_delta.take() {
            Some(held) => held.compose(&delta),
            None => delta,
        });
        self
    }

    pub fn set_element_type(mut self, element_type: ElementType) -> Self {
        self.element_type = Some(element_type);
        self
    }

    /// Replaces the type reference. An empty id makes the note untyped.
    pub fn set_note_type(mut self, note_type_id: impl Into<String>) -> Self {
        self.note_type_id = Some(note_type_id.into());
        self
    }

    pub fn value_delta(&self) -> Option<&TextDelta> {
        self.value_delta.as_ref()
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.element_type
    }

    pub fn note_type_id(&self) -> Option<&str> {
        self.note_type_id.as_deref()
    }

    /// True when applying the delta reproduces any note unchanged.
    pub fn is_noop(&self) -> bool {
        self.value_delta.as_ref().map_or(true, TextDelta::is_noop)
            && self.element_type.is_none()
            && self.note_type_id.is_none()
    }

    /// Folds `later` into this delta as if it were applied afterwards.
    pub fn merge(mut self, later: NoteDelta) -> Self {
        if let Some(delta) = later.value_delta {
            self = self.edit_value(delta);
        }
        if later.element_type.is_some() {
            self.element_type = later.element_type;
        }
        if later.note_type_id.is_some() {
            self.note_type_id = later.note_type_id;
        }
        self
    }

    /// Produces the record that results from applying this delta to `prev`.
    ///
    /// The id and children come from `prev`. The value edit clamps at the end
    /// of `prev`'s value; see [`try_apply`](Self::try_apply).
    pub fn apply(&self, prev: &impl NoteView) -> NoteRecord {
        let value = match &self.value_delta {
            Some(delta) => delta.apply(prev.value()),
            None => prev.value().to_string(),
        };
        self.build(prev, value)
    }

    /// Like [`apply`](Self::apply), but fails if the value edit reaches past
    /// the end of `prev`'s value.
    pub fn try_apply(&self, prev: &impl NoteView) -> Result<NoteRecord, NoteError> {
        let value = match &self.value_delta {
            Some(delta) => delta.try_apply(prev.value())?,
            None => prev.value().to_string(),
        };
        Ok(self.build(prev, value))
    }

    fn build(&self, prev: &impl NoteView, value: String) -> NoteRecord {
        NoteRecord {
            id: prev.id().to_string(),
            value,
            element_type: self.element_type.unwrap_or(prev.element_type()),
            note_type_id: self
                .note_type_id
                .clone()
                .unwrap_or_else(|| prev.note_type_id().to_string()),
            children_ids: prev.children_ids().to_vec(),
        }
    }
}
