//! Edit records produced by the diff engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::escape::escape;

/// The kind of edit an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// The value was removed from the left sequence.
    Delete,
    /// The value was inserted from the right sequence.
    Insert,
}

/// A single edit.
///
/// `position` is the index into the *left* sequence at which the edit
/// applies; a delete/insert pair sharing one position describes a
/// substitution at that point. Positions are absolute, not relative to
/// the window that produced the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry<T> {
    pub position: usize,
    pub kind: EditKind,
    pub value: T,
}

impl<T> DiffEntry<T> {
    pub fn new(position: usize, kind: EditKind, value: T) -> Self {
        Self {
            position,
            kind,
            value,
        }
    }

    pub fn delete(position: usize, value: T) -> Self {
        Self::new(position, EditKind::Delete, value)
    }

    pub fn insert(position: usize, value: T) -> Self {
        Self::new(position, EditKind::Insert, value)
    }
}

impl<T: fmt::Display> fmt::Display for DiffEntry<T> {
    /// Renders as `<position>:<sign><escaped-value>`, e.g. `8:+H`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.kind {
            EditKind::Delete => '-',
            EditKind::Insert => '+',
        };
        write!(f, "{}:{}{}", self.position, sign, escape(&self.value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        assert_eq!(DiffEntry::insert(0, 'z').to_string(), "0:+z");
        assert_eq!(DiffEntry::delete(25, 'z').to_string(), "25:-z");
        assert_eq!(DiffEntry::insert(25, ' ').to_string(), "25:+ ");
    }

    #[test]
    fn test_display_escapes_value() {
        let entry = DiffEntry::delete(1, "a\tb".to_string());
        assert_eq!(entry.to_string(), "1:-a\\tb");
    }

    #[test]
    fn test_serde_round_trip() {
        let entry = DiffEntry::insert(8, 'H');
        let json = serde_json::to_string(&entry).unwrap();
        let back: DiffEntry<char> = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
