//! Topic-map element kinds a note can represent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NoteError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// No particular kind; serialized as the empty string.
    #[default]
    #[serde(rename = "")]
    Any,
    Name,
    Variant,
    Occurrence,
    Association,
    Role,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Any => "",
            ElementType::Name => "name",
            ElementType::Variant => "variant",
            ElementType::Occurrence => "occurrence",
            ElementType::Association => "association",
            ElementType::Role => "role",
        }
    }
}

impl FromStr for ElementType {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(ElementType::Any),
            "name" => Ok(ElementType::Name),
            "variant" => Ok(ElementType::Variant),
            "occurrence" => Ok(ElementType::Occurrence),
            "association" => Ok(ElementType::Association),
            "role" => Ok(ElementType::Role),
            other => Err(NoteError::InvalidElementType(other.to_string())),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
