//! The plain note record exchanged with storage and editor collaborators.

use serde::{Deserialize, Serialize};

use crate::element_type::ElementType;

/// One note as stored: its value, element type, type reference, and ordered
/// child ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub element_type: ElementType,
    /// Id of the note describing this note's type. Empty means untyped.
    #[serde(default, rename = "typeReferenceId")]
    pub note_type_id: String,
    #[serde(default, rename = "childIds")]
    pub children_ids: Vec<String>,
}

impl NoteRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_element_type(mut self, element_type: ElementType) -> Self {
        self.element_type = element_type;
        self
    }

    pub fn with_note_type(mut self, note_type_id: impl Into<String>) -> Self {
        self.note_type_id = note_type_id.into();
        self
    }

    pub fn with_children<I, S>(mut self, children_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children_ids = children_ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Read access shared by [`NoteRecord`] and [`NoteModel`](crate::NoteModel),
/// so deltas can be applied to either.
pub trait NoteView {
    fn id(&self) -> &str;
    fn value(&self) -> &str;
    fn element_type(&self) -> ElementType;
    fn note_type_id(&self) -> &str;
    fn children_ids(&self) -> &[String];
}

impl NoteView for NoteRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn element_type(&self) -> ElementType {
        self.element_type
    }

    fn note_type_id(&self) -> &str {
        &self.note_type_id
    }

    fn children_ids(&self) -> &[String] {
        &self.children_ids
    }
}
