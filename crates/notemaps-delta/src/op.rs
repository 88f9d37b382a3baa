//! Delta operations.
//!
//! An [`Op`] is one step of a [`TextDelta`](crate::TextDelta):
//! - `Retain(n)` — copy the next `n` chars of the base
//! - `Insert(s)` — emit `s`, consuming nothing
//! - `Remove(n)` — skip the next `n` chars of the base

use std::fmt;
use std::str::FromStr;

use crate::error::DeltaError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    Retain(usize),
    Insert(String),
    Remove(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Retain,
    Insert,
    Remove,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Retain => "retain",
            OpKind::Insert => "insert",
            OpKind::Remove => "remove",
        }
    }
}

impl FromStr for OpKind {
    type Err = DeltaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retain" => Ok(OpKind::Retain),
            "insert" => Ok(OpKind::Insert),
            "remove" => Ok(OpKind::Remove),
            other => Err(DeltaError::InvalidOperation(other.to_string())),
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Op {
    /// Builds an op from a kind tag and its payload. `length` is read for
    /// `retain`/`remove`, `content` for `insert`.
    pub fn from_parts(kind: &str, length: usize, content: &str) -> Result<Self, DeltaError> {
        Ok(match kind.parse::<OpKind>()? {
            OpKind::Retain => Op::Retain(length),
            OpKind::Insert => Op::Insert(content.to_string()),
            OpKind::Remove => Op::Remove(length),
        })
    }

    pub fn kind(&self) -> OpKind {
        match self {
            Op::Retain(_) => OpKind::Retain,
            Op::Insert(_) => OpKind::Insert,
            Op::Remove(_) => OpKind::Remove,
        }
    }

    /// Chars consumed from the base string.
    pub fn base_len(&self) -> usize {
        match self {
            Op::Retain(n) | Op::Remove(n) => *n,
            Op::Insert(_) => 0,
        }
    }

    /// Chars produced in the output string.
    pub fn target_len(&self) -> usize {
        match self {
            Op::Retain(n) => *n,
            Op::Insert(s) => s.chars().count(),
            Op::Remove(_) => 0,
        }
    }

    /// True for `Retain(0)`, `Remove(0)` and `Insert("")`.
    pub fn is_empty(&self) -> bool {
        match self {
            Op::Retain(n) | Op::Remove(n) => *n == 0,
            Op::Insert(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Retain(n) => write!(f, "r{n}"),
            Op::Insert(s) => write!(f, "i{s:?}"),
            Op::Remove(n) => write!(f, "d{n}"),
        }
    }
}

/// Splits `s` after its first `n` chars. `n` past the end yields `(s, "")`.
pub(crate) fn split_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((at, _)) => s.split_at(at),
        None => (s, ""),
    }
}
