//! Facade entry points for character, line and file based diffs.

use std::convert::Infallible;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::differ::Differ;
use crate::result::DiffResult;

/// Default window capacity (in lines) for line based diffs.
pub const DEFAULT_LINE_WINDOW: usize = 100;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("failed to read diff input: {0}")]
    Io(#[from] io::Error),
}

/// Diffs two strings character by character.
///
/// The window is sized to the longer input, so in-memory strings are
/// never truncated by capacity.
pub fn characters(left: &str, right: &str) -> DiffResult<char> {
    let range = left.chars().count().max(right.chars().count());
    let mut differ = Differ::new(range);

    differ.feed_left_from(left.chars());
    differ.feed_right_from(right.chars());
    differ.run(true);
    differ.into_result()
}

/// Diffs two strings line by line with the default window.
pub fn lines(left: &str, right: &str) -> DiffResult<String> {
    lines_with_window(left, right, DEFAULT_LINE_WINDOW)
}

/// Diffs two strings line by line, buffering at most `window` lines
/// per side.
pub fn lines_with_window(left: &str, right: &str, window: usize) -> DiffResult<String> {
    let left_lines = left.lines().map(|line| Ok::<_, Infallible>(line.to_string()));
    let right_lines = right.lines().map(|line| Ok::<_, Infallible>(line.to_string()));

    match drive(left_lines, right_lines, window) {
        Ok(result) => result,
        Err(never) => match never {},
    }
}

/// Diffs two files line by line with the default window.
///
/// The files are read as UTF-8; I/O errors propagate unchanged.
pub fn files(left: &Path, right: &Path) -> Result<DiffResult<String>, DiffError> {
    files_with_window(left, right, DEFAULT_LINE_WINDOW)
}

/// Diffs two files line by line, buffering at most `window` lines per
/// side.
pub fn files_with_window(
    left: &Path,
    right: &Path,
    window: usize,
) -> Result<DiffResult<String>, DiffError> {
    let left_lines = BufReader::new(File::open(left)?).lines();
    let right_lines = BufReader::new(File::open(right)?).lines();
    Ok(drive(left_lines, right_lines, window)?)
}

/// Streams both sources through a windowed differ.
///
/// While the differ is restrained and input remains: top up the left
/// buffer until full or exhausted, then the right buffer, then run a
/// non-finishing pass that slides the window. A final finishing run
/// flushes whatever is left.
fn drive<T, E, L, R>(mut left: L, mut right: R, window: usize) -> Result<DiffResult<T>, E>
where
    T: PartialEq + Clone,
    L: Iterator<Item = Result<T, E>>,
    R: Iterator<Item = Result<T, E>>,
{
    let mut differ = Differ::new(window);
    let mut pending_left = left.next().transpose()?;
    let mut pending_right = right.next().transpose()?;

    while differ.is_restrained() && (pending_left.is_some() || pending_right.is_some()) {
        while let Some(value) = pending_left.take() {
            pending_left = left.next().transpose()?;
            if !differ.feed_left(value) {
                break;
            }
        }
        while let Some(value) = pending_right.take() {
            pending_right = right.next().transpose()?;
            if !differ.feed_right(value) {
                break;
            }
        }
        differ.run(false);
    }
    differ.run(true);
    Ok(differ.into_result())
}
