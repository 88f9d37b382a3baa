//! Text deltas for note values.
//!
//! A [`TextDelta`] is an ordered list of [`Op`]s that rewrites a base string
//! left to right: `Retain` copies characters, `Insert` emits new text, and
//! `Remove` drops characters. Deltas can be applied to a string or composed
//! with a later delta into a single equivalent delta.
//!
//! All lengths are counted in `char`s.

pub mod delta;
pub mod error;
pub mod op;

pub use delta::TextDelta;
pub use error::DeltaError;
pub use op::{Op, OpKind};
