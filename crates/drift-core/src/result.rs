//! Diff results and hunk-grouped rendering.

use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::entry::{DiffEntry, EditKind};
use crate::escape::escape;

/// The outcome of one comparison.
///
/// Entries are ordered by non-decreasing position. `restrained` tells
/// whether the full edit script was computed (`true`) or the edit
/// distance exceeded the configured window and the script is truncated
/// (`false`). A non-restrained result is not an error; callers decide
/// whether to re-run with a larger window or accept the truncation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffResult<T> {
    entries: Vec<DiffEntry<T>>,
    restrained: bool,
}

impl<T> DiffResult<T> {
    /// Invariant: `entries` must be in non-decreasing position order.
    pub fn new(entries: Vec<DiffEntry<T>>, restrained: bool) -> Self {
        Self {
            entries,
            restrained,
        }
    }

    pub fn is_restrained(&self) -> bool {
        self.restrained
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DiffEntry<T>> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[DiffEntry<T>] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, DiffEntry<T>> {
        self.entries.iter()
    }
}

impl DiffResult<char> {
    /// The canonical result for two fully matching character sequences.
    pub fn character_match() -> Self {
        Self::new(Vec::new(), true)
    }
}

impl DiffResult<String> {
    /// The canonical result for two fully matching line sequences.
    pub fn line_match() -> Self {
        Self::new(Vec::new(), true)
    }
}

/// Equality compares entry sequences only; the `restrained` flag is
/// deliberately excluded so a truncated empty result still equals the
/// canonical match.
impl<T: PartialEq> PartialEq for DiffResult<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<T: Eq> Eq for DiffResult<T> {}

impl<'a, T> IntoIterator for &'a DiffResult<T> {
    type Item = &'a DiffEntry<T>;
    type IntoIter = slice::Iter<'a, DiffEntry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T: fmt::Display> fmt::Display for DiffResult<T> {
    /// Renders entries grouped into hunks.
    ///
    /// Consecutive entries whose position gap is at most 1 share one
    /// hunk. Each hunk prints a `@<position>` header, its delete lines
    /// (`< value`), a `---` separator when both kinds are present, and
    /// its insert lines (`> value`). A trailing `...` line marks a
    /// truncated result.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hunk_start = 0;
        for i in 1..=self.entries.len() {
            let end_of_hunk = i == self.entries.len()
                || self.entries[i]
                    .position
                    .saturating_sub(self.entries[i - 1].position)
                    > 1;
            if end_of_hunk {
                fmt_hunk(f, &self.entries[hunk_start..i])?;
                hunk_start = i;
            }
        }
        if !self.restrained {
            writeln!(f, "...")?;
        }
        Ok(())
    }
}

fn fmt_hunk<T: fmt::Display>(f: &mut fmt::Formatter<'_>, hunk: &[DiffEntry<T>]) -> fmt::Result {
    writeln!(f, "@{}", hunk[0].position)?;

    let mut deletes = 0;
    for entry in hunk.iter().filter(|e| e.kind == EditKind::Delete) {
        writeln!(f, "< {}", escape(&entry.value.to_string()))?;
        deletes += 1;
    }
    let mut inserts = 0;
    for entry in hunk.iter().filter(|e| e.kind == EditKind::Insert) {
        if inserts == 0 && deletes > 0 {
            writeln!(f, "---")?;
        }
        writeln!(f, "> {}", escape(&entry.value.to_string()))?;
        inserts += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_restrained() {
        let a: DiffResult<char> = DiffResult::new(Vec::new(), true);
        let b: DiffResult<char> = DiffResult::new(Vec::new(), false);
        assert_eq!(a, b);
        assert_eq!(b, DiffResult::character_match());
    }

    #[test]
    fn test_equality_compares_entries() {
        let a = DiffResult::new(vec![DiffEntry::insert(0, 'x')], true);
        let b = DiffResult::new(vec![DiffEntry::insert(0, 'x')], true);
        let c = DiffResult::new(vec![DiffEntry::delete(0, 'x')], true);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_render_mixed_hunk_has_separator() {
        let result = DiffResult::new(
            vec![DiffEntry::insert(0, 'z'), DiffEntry::delete(0, 'a')],
            true,
        );
        assert_eq!(result.to_string(), "@0\n< a\n---\n> z\n");
    }

    #[test]
    fn test_render_single_kind_hunk_has_no_separator() {
        let deletes_only = DiffResult::new(
            vec![DiffEntry::delete(3, 'x'), DiffEntry::delete(4, 'y')],
            true,
        );
        assert_eq!(deletes_only.to_string(), "@3\n< x\n< y\n");

        let inserts_only = DiffResult::new(vec![DiffEntry::insert(7, 'q')], true);
        assert_eq!(inserts_only.to_string(), "@7\n> q\n");
    }

    #[test]
    fn test_render_splits_hunks_on_position_gap() {
        let result = DiffResult::new(
            vec![
                DiffEntry::delete(0, 'a'),
                DiffEntry::delete(1, 'b'),
                DiffEntry::insert(5, 'c'),
            ],
            true,
        );
        assert_eq!(result.to_string(), "@0\n< a\n< b\n@5\n> c\n");
    }

    #[test]
    fn test_render_truncation_marker() {
        let result = DiffResult::new(vec![DiffEntry::delete(0, 'a')], false);
        assert_eq!(result.to_string(), "@0\n< a\n...\n");

        let empty: DiffResult<char> = DiffResult::new(Vec::new(), false);
        assert_eq!(empty.to_string(), "...\n");
    }

    #[test]
    fn test_render_empty_match() {
        assert_eq!(DiffResult::character_match().to_string(), "");
    }

    #[test]
    fn test_serde_round_trip() {
        let result = DiffResult::new(
            vec![DiffEntry::insert(1, "line".to_string())],
            false,
        );
        let json = serde_json::to_string(&result).unwrap();
        let back: DiffResult<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
        assert!(!back.is_restrained());
    }
}
