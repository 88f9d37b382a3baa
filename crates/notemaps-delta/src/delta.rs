//! The [`TextDelta`] builder and its apply/compose algorithms.

use std::fmt;

use tracing::{debug, trace};

use crate::error::DeltaError;
use crate::op::{split_chars, Op};

/// An ordered sequence of [`Op`]s describing an edit of a string.
///
/// The builder never stores empty ops and merges an op into the previous one
/// when both have the same kind, so `retain(2).retain(3)` holds a single
/// `Retain(5)`. A merge that would overflow `usize` starts a new op instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDelta {
    ops: Vec<Op>,
}

impl TextDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retains, or skips over, `length` chars of the base string.
    pub fn retain(mut self, length: usize) -> Self {
        self.push(Op::Retain(length));
        self
    }

    pub fn insert(mut self, content: impl Into<String>) -> Self {
        self.push(Op::Insert(content.into()));
        self
    }

    pub fn remove(mut self, length: usize) -> Self {
        self.push(Op::Remove(length));
        self
    }

    /// Appends `op` through the builder method matching its kind.
    pub fn append(self, op: Op) -> Self {
        match op {
            Op::Retain(n) => self.retain(n),
            Op::Insert(s) => self.insert(s),
            Op::Remove(n) => self.remove(n),
        }
    }

    /// In-place form of [`append`](Self::append).
    pub fn push(&mut self, op: Op) {
        if op.is_empty() {
            return;
        }
        let op = match (self.ops.last_mut(), op) {
            (Some(Op::Retain(n)), Op::Retain(m)) => match n.checked_add(m) {
                Some(sum) => { *n = sum; return; }
                None => Op::Retain(m),
            },
            (Some(Op::Remove(n)), Op::Remove(m)) => match n.checked_add(m) {
                Some(sum) => { *n = sum; return; }
                None => Op::Remove(m),
            },
            (Some(Op::Insert(s)), Op::Insert(t)) => { s.push_str(&t); return; }
            (_, op) => op,
        };
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Chars of the base string explicitly consumed by retains and removes.
    pub fn base_len(&self) -> usize {
        self.ops
            .iter()
            .map(Op::base_len)
            .fold(0, usize::saturating_add)
    }

    /// Chars added by inserts.
    pub fn inserted_len(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Insert(_)))
            .map(Op::target_len)
            .fold(0, usize::saturating_add)
    }

    /// Length in chars of `self.apply(b)` for any `b` of `base_len` chars
    /// that covers [`Self::base_len`].
    pub fn target_len(&self, base_len: usize) -> usize {
        let consumed = self.base_len();
        let produced = self
            .ops
            .iter()
            .map(Op::target_len)
            .fold(0, usize::saturating_add);
        produced.saturating_add(base_len.saturating_sub(consumed))
    }

    /// True when applying the delta can never change a string.
    pub fn is_noop(&self) -> bool {
        self.ops.iter().all(|op| matches!(op, Op::Retain(_)))
    }

    /// Applies the delta to `base`.
    ///
    /// A retain or remove that runs past the end of `base` is clamped at the
    /// boundary. Use [`try_apply`](Self::try_apply) to reject it instead.
    pub fn apply(&self, base: &str) -> String {
        let chars: Vec<char> = base.chars().collect();
        let mut result = String::with_capacity(base.len());
        let mut idx = 0usize;

        for (index, op) in self.ops.iter().enumerate() {
            match op {
                Op::Retain(n) => {
                    let end = clamp(index, idx, *n, chars.len());
                    result.extend(chars[idx..end].iter());
                    idx = end;
                }
                Op::Insert(s) => result.push_str(s),
                Op::Remove(n) => {
                    idx = clamp(index, idx, *n, chars.len());
                }
            }
        }
        result.extend(chars[idx..].iter());
        result
    }

    /// Applies the delta to `base`, failing with [`DeltaError::OutOfRange`]
    /// when a retain or remove would pass the end of `base`.
    pub fn try_apply(&self, base: &str) -> Result<String, DeltaError> {
        let chars: Vec<char> = base.chars().collect();
        let mut result = String::with_capacity(base.len());
        let mut idx = 0usize;

        for (index, op) in self.ops.iter().enumerate() {
            let length = op.base_len();
            let end = idx
                .checked_add(length)
                .filter(|end| *end <= chars.len())
                .ok_or(DeltaError::OutOfRange {
                    index,
                    cursor: idx,
                    length,
                    base_len: chars.len(),
                })?;
            match op {
                Op::Retain(_) => result.extend(chars[idx..end].iter()),
                Op::Insert(s) => result.push_str(s),
                Op::Remove(_) => {}
            }
            idx = end;
        }
        result.extend(chars[idx..].iter());
        Ok(result)
    }

    /// Composes `self` with a delta meant to run after it.
    ///
    /// For every base `b` that both deltas fit, the result satisfies
    /// `other.apply(&self.apply(b)) == self.compose(other).apply(b)`.
    pub fn compose(&self, other: &TextDelta) -> TextDelta {
        let mut merged = TextDelta::new();
        let mut iter1 = self.ops.iter();
        let mut iter2 = other.ops.iter();
        let mut rem1: Option<Op> = None;
        let mut rem2: Option<Op> = None;

        loop {
            let c1 = rem1.take().or_else(|| iter1.next().cloned());
            let c2 = rem2.take().or_else(|| iter2.next().cloned());

            let (c1, c2) = match (c1, c2) {
                (None, None) => break,
                (Some(c), None) | (None, Some(c)) => {
                    merged.push(c);
                    continue;
                }
                (Some(c1), Some(c2)) => (c1, c2),
            };

            match (c1, c2) {
                // Text inserted by the second delta is untouched by the first.
                (c1, Op::Insert(s)) => {
                    merged.push(Op::Insert(s));
                    rem1 = Some(c1);
                }
                // Removed chars never reach the second delta.
                (Op::Remove(n), c2) => {
                    merged.push(Op::Remove(n));
                    rem2 = Some(c2);
                }
                (Op::Retain(n), Op::Retain(m)) => {
                    merged.push(Op::Retain(n.min(m)));
                    if n > m {
                        rem1 = Some(Op::Retain(n - m));
                    } else if m > n {
                        rem2 = Some(Op::Retain(m - n));
                    }
                }
                (Op::Retain(n), Op::Remove(m)) => {
                    merged.push(Op::Remove(n.min(m)));
                    if n > m {
                        rem1 = Some(Op::Retain(n - m));
                    } else if m > n {
                        rem2 = Some(Op::Remove(m - n));
                    }
                }
                (Op::Insert(s), Op::Retain(m)) => {
                    let s_len = s.chars().count();
                    let (kept, rest) = split_chars(&s, m);
                    merged.push(Op::Insert(kept.to_string()));
                    if s_len > m {
                        rem1 = Some(Op::Insert(rest.to_string()));
                    } else if m > s_len {
                        rem2 = Some(Op::Retain(m - s_len));
                    }
                }
                // The second delta removes text the first one inserted.
                (Op::Insert(s), Op::Remove(m)) => {
                    let s_len = s.chars().count();
                    if s_len > m {
                        rem1 = Some(Op::Insert(split_chars(&s, m).1.to_string()));
                    } else if m > s_len {
                        rem2 = Some(Op::Remove(m - s_len));
                    }
                }
            }
        }

        trace!(
            left = self.ops.len(),
            right = other.ops.len(),
            merged = merged.ops.len(),
            "composed text deltas"
        );
        merged
    }

    /// Composes `deltas` left to right. An empty input yields the identity.
    pub fn compose_all<'a, I>(deltas: I) -> TextDelta
    where
        I: IntoIterator<Item = &'a TextDelta>,
    {
        deltas
            .into_iter()
            .fold(TextDelta::new(), |acc, next| acc.compose(next))
    }
}

fn clamp(index: usize, cursor: usize, length: usize, base_len: usize) -> usize {
    let end = cursor.saturating_add(length);
    if end > base_len {
        debug!(index, cursor, length, base_len, "clamping delta op at end of base");
        base_len
    } else {
        end
    }
}

impl From<Vec<Op>> for TextDelta {
    fn from(ops: Vec<Op>) -> Self {
        ops.into_iter().collect()
    }
}

impl FromIterator<Op> for TextDelta {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        let mut delta = TextDelta::new();
        delta.extend(iter);
        delta
    }
}

impl Extend<Op> for TextDelta {
    fn extend<I: IntoIterator<Item = Op>>(&mut self, iter: I) {
        for op in iter {
            self.push(op);
        }
    }
}

impl fmt::Display for TextDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ins(s: &str) -> Op {
        Op::Insert(s.to_string())
    }

    #[test]
    fn retain_of_full_length_is_identity() {
        let base = "hello";
        assert_eq!(TextDelta::new().retain(5).apply(base), base);
        assert_eq!(TextDelta::new().apply(base), base);
    }

    #[test]
    fn apply_simple_ops() {
        assert_eq!(TextDelta::new().insert("abc").apply("def"), "abcdef");
        assert_eq!(TextDelta::new().remove(3).apply("xyzabc"), "abc");
        assert_eq!(
            TextDelta::new().retain(3).insert("def").apply("abcghi"),
            "abcdefghi"
        );
        assert_eq!(
            TextDelta::new().retain(3).remove(3).apply("abcxyzghi"),
            "abcghi"
        );
    }

    #[test]
    fn apply_counts_chars_not_bytes() {
        let d = TextDelta::new().retain(2).remove(1).insert("ö");
        assert_eq!(d.apply("héllo"), "héölo");
    }

    #[test]
    fn apply_clamps_past_end() {
        assert_eq!(TextDelta::new().retain(10).insert("!").apply("abc"), "abc!");
        assert_eq!(TextDelta::new().remove(10).insert("x").apply("abc"), "x");
    }

    #[test]
    fn try_apply_rejects_past_end() {
        let d = TextDelta::new().retain(2).insert("x").remove(5);
        assert_eq!(
            d.try_apply("abcd"),
            Err(DeltaError::OutOfRange {
                index: 2,
                cursor: 2,
                length: 5,
                base_len: 4,
            })
        );
        assert_eq!(d.try_apply("abcdefg").as_deref(), Ok("abx"));
    }

    #[test]
    fn try_apply_rejects_lengths_that_overflow_the_cursor() {
        let d = TextDelta::new().retain(1).insert("x").retain(usize::MAX);
        assert_eq!(
            d.try_apply("abc"),
            Err(DeltaError::OutOfRange {
                index: 2,
                cursor: 1,
                length: usize::MAX,
                base_len: 3,
            })
        );
        assert_eq!(d.apply("abc"), "axbc");
    }

    #[test]
    fn coalescing_stops_at_usize_max() {
        let d = TextDelta::new().retain(usize::MAX).retain(1);
        assert_eq!(d.ops(), &[Op::Retain(usize::MAX), Op::Retain(1)]);
        let d = TextDelta::new().remove(usize::MAX).remove(2).remove(3);
        assert_eq!(d.ops(), &[Op::Remove(usize::MAX), Op::Remove(5)]);
        assert_eq!(d.base_len(), usize::MAX);
        assert_eq!(d.apply("abc"), "");

        let composed = TextDelta::new()
            .retain(usize::MAX)
            .compose(&TextDelta::new().retain(usize::MAX).retain(1));
        assert_eq!(composed.ops(), &[Op::Retain(usize::MAX), Op::Retain(1)]);
    }

    #[test]
    fn builder_drops_empty_and_coalesces() {
        let d = TextDelta::new()
            .retain(0)
            .retain(2)
            .retain(3)
            .insert("")
            .insert("a")
            .insert("b")
            .remove(0)
            .remove(1)
            .remove(1);
        assert_eq!(d.ops(), &[Op::Retain(5), ins("ab"), Op::Remove(2)]);
    }

    #[test]
    fn append_dispatches_by_kind() {
        let d = TextDelta::new()
            .append(Op::Retain(1))
            .append(ins("x"))
            .append(Op::Remove(1));
        assert_eq!(d, TextDelta::new().retain(1).insert("x").remove(1));
    }

    #[test]
    fn measures() {
        let d = TextDelta::new().retain(2).insert("xyz").remove(3);
        assert_eq!(d.base_len(), 5);
        assert_eq!(d.inserted_len(), 3);
        assert_eq!(d.target_len(7), 2 + 3 + 2);
        assert!(!d.is_noop());
        assert!(TextDelta::new().retain(4).is_noop());
    }

    #[test]
    fn compose_insert_before_insertion() {
        let d = TextDelta::new()
            .insert("def")
            .compose(&TextDelta::new().insert("abc"));
        assert_eq!(d.apply("ghi"), "abcdefghi");
        assert_eq!(d.ops(), &[ins("abcdef")]);
    }

    #[test]
    fn compose_retain_and_insert_after_insertion() {
        let d = TextDelta::new()
            .insert("abc")
            .compose(&TextDelta::new().retain(3).insert("def"));
        assert_eq!(d.apply("ghi"), "abcdefghi");
    }

    #[test]
    fn compose_retain_and_remove_after_insertion() {
        let d = TextDelta::new()
            .insert("abc")
            .compose(&TextDelta::new().retain(3).remove(3));
        assert_eq!(d.apply("xyz"), "abc");
    }

    #[test]
    fn compose_retain_retain_keeps_leftover() {
        let a = TextDelta::new().retain(5).insert("!");
        let b = TextDelta::new().retain(2).insert("-");
        let c = a.compose(&b);
        assert_eq!(c.ops(), &[Op::Retain(2), ins("-"), Op::Retain(3), ins("!")]);
        assert_eq!(c.apply("hello"), "he-llo!");
    }

    #[test]
    fn compose_retain_over_partial_insert_splits_insert() {
        let a = TextDelta::new().insert("abcd");
        let b = TextDelta::new().retain(2).insert("X");
        let c = a.compose(&b);
        assert_eq!(c.ops(), &[ins("abXcd")]);
        assert_eq!(c.apply("z"), "abXcdz");
    }

    #[test]
    fn compose_retain_longer_than_insert_reaches_base() {
        let a = TextDelta::new().insert("ab");
        let b = TextDelta::new().retain(3).insert("X");
        let c = a.compose(&b);
        assert_eq!(c.ops(), &[ins("ab"), Op::Retain(1), ins("X")]);
        assert_eq!(c.apply("cd"), "abcXd");
    }

    #[test]
    fn compose_retain_after_remove_skips_removed_text() {
        let a = TextDelta::new().remove(3);
        let b = TextDelta::new().retain(1).insert("X");
        let c = a.compose(&b);
        assert_eq!(c.ops(), &[Op::Remove(3), Op::Retain(1), ins("X")]);
        assert_eq!(c.apply("abcdef"), "dXef");
        assert_eq!(b.apply(&a.apply("abcdef")), "dXef");
    }

    #[test]
    fn compose_remove_over_retain() {
        let a = TextDelta::new().retain(2).insert("X");
        let b = TextDelta::new().remove(1);
        let c = a.compose(&b);
        assert_eq!(c.ops(), &[Op::Remove(1), Op::Retain(1), ins("X")]);
        assert_eq!(c.apply("abc"), "bXc");
    }

    #[test]
    fn compose_remove_exactly_cancels_insert() {
        let a = TextDelta::new().insert("abc");
        let b = TextDelta::new().remove(3);
        let c = a.compose(&b);
        assert!(c.is_empty());
        assert_eq!(c.apply("xyz"), "xyz");
    }

    #[test]
    fn compose_remove_shorter_than_insert_keeps_suffix() {
        let a = TextDelta::new().insert("abc");
        let b = TextDelta::new().remove(2);
        let c = a.compose(&b);
        assert_eq!(c.ops(), &[ins("c")]);
        assert_eq!(c.apply("xyz"), "cxyz");
    }

    #[test]
    fn compose_remove_longer_than_insert_reaches_base() {
        let a = TextDelta::new().insert("ab");
        let b = TextDelta::new().remove(3);
        let c = a.compose(&b);
        assert_eq!(c.ops(), &[Op::Remove(1)]);
        assert_eq!(c.apply("xyz"), "yz");
    }

    #[test]
    fn compose_remove_after_remove_does_not_interact() {
        let a = TextDelta::new().remove(2);
        let b = TextDelta::new().remove(1);
        let c = a.compose(&b);
        assert_eq!(c.ops(), &[Op::Remove(3)]);
        assert_eq!(c.apply("abcd"), "d");
        assert_eq!(b.apply(&a.apply("abcd")), "d");
    }

    #[test]
    fn compose_with_empty_is_identity() {
        let d = TextDelta::new().retain(1).insert("x").remove(2);
        assert_eq!(d.compose(&TextDelta::new()), d);
        assert_eq!(TextDelta::new().compose(&d), d);
    }

    #[test]
    fn compose_never_emits_empty_ops() {
        let a = TextDelta::new().retain(2).insert("ab").remove(1);
        let b = TextDelta::new().retain(2).remove(2).retain(1);
        let c = a.compose(&b);
        assert!(c.ops().iter().all(|op| !op.is_empty()));
        assert_eq!(c.apply("xyzw"), b.apply(&a.apply("xyzw")));
    }

    #[test]
    fn compose_does_not_touch_inputs() {
        let a = TextDelta::new().insert("abcd");
        let b = TextDelta::new().retain(1).remove(2);
        let (a0, b0) = (a.clone(), b.clone());
        let _ = a.compose(&b);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn compose_all_folds_in_order() {
        let steps = [
            TextDelta::new().insert("a"),
            TextDelta::new().retain(1).insert("b"),
            TextDelta::new().retain(2).insert("c"),
        ];
        assert_eq!(TextDelta::compose_all(&steps).apply(""), "abc");
        assert!(TextDelta::compose_all(std::iter::empty()).is_empty());
    }

    #[test]
    fn display_lists_ops() {
        let d = TextDelta::new().retain(3).insert("def").remove(3);
        assert_eq!(d.to_string(), "r3 i\"def\" d3");
    }
}
