//! The windowed Myers diff engine.
//!
//! A [`Differ`] serves exactly one comparison. Elements are pushed into
//! two fixed-capacity window buffers via the `feed_*` operations;
//! [`Differ::run`] diffs the current window contents and decides which
//! prefix of the window is finally resolved and can be flushed. The
//! global offset accumulated across flushes keeps emitted entry
//! positions absolute.
//!
//! The engine itself is the classic Myers O(ND) algorithm with
//! simultaneous forward/reverse frontiers: it searches for a middle
//! snake, recurses on the two sub-problems around it, and falls back to
//! direct emission for degenerate cases. The two trace buffers are
//! sized once from the window capacity and reused across all recursive
//! calls of one invocation.
//!
//! Not safe for concurrent use; one instance per comparison, external
//! synchronization if shared.

use crate::entry::{DiffEntry, EditKind};
use crate::result::DiffResult;

/// Windowed differ over any equality-comparable element type.
pub struct Differ<T> {
    range: usize,
    left: Vec<T>,
    right: Vec<T>,
    offset: usize,
    max_match: Option<usize>,
    restrained: bool,
    entries: Vec<DiffEntry<T>>,
    forward: Vec<isize>,
    reverse: Vec<isize>,
}

/// A maximal run of matching elements along one diagonal, in
/// window-relative left-index units.
struct Snake {
    start: isize,
    end: isize,
    diag: isize,
}

impl Snake {
    /// A snake pinned to a slice corner with a boundary diagonal splits
    /// off an empty sub-problem; such sub-problems are handled by
    /// direct emission instead of recursing forever.
    fn is_degenerate(
        &self,
        left_start: isize,
        left_end: isize,
        right_start: isize,
        right_end: isize,
    ) -> bool {
        (self.start == left_end && self.diag == left_end - right_end)
            || (self.end == left_start && self.diag == left_start - right_start)
    }
}

impl<T: PartialEq + Clone> Differ<T> {
    /// Creates a differ whose window holds up to `range` unresolved
    /// elements per side.
    pub fn new(range: usize) -> Self {
        Self {
            range,
            left: Vec::with_capacity(range),
            right: Vec::with_capacity(range),
            offset: 0,
            max_match: None,
            restrained: true,
            entries: Vec::new(),
            forward: vec![0; 2 * range + 2],
            reverse: vec![0; 2 * range + 2],
        }
    }

    /// The configured window capacity per side.
    pub fn range(&self) -> usize {
        self.range
    }

    /// `false` once the edit distance has exceeded what the window can
    /// represent; the differ never resumes from that state.
    pub fn is_restrained(&self) -> bool {
        self.restrained
    }

    /// Appends one element to the left window buffer.
    ///
    /// Returns whether the buffer still has room. Feeding a full buffer
    /// is a contract violation and panics.
    pub fn feed_left(&mut self, value: T) -> bool {
        assert!(self.left.len() < self.range, "left window is already full");

        self.left.push(value);
        self.left.len() < self.range
    }

    /// Appends one element to the right window buffer.
    ///
    /// Returns whether the buffer still has room. Feeding a full buffer
    /// is a contract violation and panics.
    pub fn feed_right(&mut self, value: T) -> bool {
        assert!(self.right.len() < self.range, "right window is already full");

        self.right.push(value);
        self.right.len() < self.range
    }

    /// Feeds elements into the left buffer until it fills up or the
    /// source is exhausted. Returns whether room remains.
    pub fn feed_left_from<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            if !self.feed_left(value) {
                break;
            }
        }
        self.left.len() < self.range
    }

    /// Feeds elements into the right buffer until it fills up or the
    /// source is exhausted. Returns whether room remains.
    pub fn feed_right_from<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            if !self.feed_right(value) {
                break;
            }
        }
        self.right.len() < self.range
    }

    /// Diffs the current window and slides it.
    ///
    /// With `finish == false` the window is flushed only up to the
    /// furthest confirmed match: entries beyond it are discarded (to be
    /// recomputed against the next window's additional data) and the
    /// unresolved tails of both buffers are carried over to the front.
    /// With `finish == true`, or when the window produced no match at
    /// all, the whole window is resolved. Clearing `restrained` - by a
    /// matchless window or by a carried tail that fills the window - is
    /// terminal: the flag never comes back, and the result stays marked
    /// as truncated.
    pub fn run(&mut self, finish: bool) {
        if self.restrained {
            self.run_slices(0, self.left.len(), 0, self.right.len());
        }
        match self.max_match {
            Some(max_match) if !finish => {
                let mut left_keep = 0;
                let mut right_keep = 0;

                while let Some(last) = self.entries.last() {
                    if last.position <= max_match {
                        break;
                    }
                    match last.kind {
                        EditKind::Delete => left_keep += 1,
                        EditKind::Insert => right_keep += 1,
                    }
                    self.entries.pop();
                }

                let resolved = self.left.len() - left_keep;
                self.left.drain(..resolved);
                self.right.drain(..self.right.len() - right_keep);
                self.offset += resolved;
                self.restrained = self.restrained
                    && self.left.len() < self.range
                    && self.right.len() < self.range;
            }
            _ => {
                self.offset += self.left.len();
                self.left.clear();
                self.right.clear();
                // A window without a single match cannot guarantee a
                // correct partial script; an entirely empty comparison
                // is vacuously complete. A flag already cleared by an
                // overflowing window stays cleared: the unresolved tail
                // was dropped and finishing cannot restore it.
                self.restrained =
                    self.restrained && (self.max_match.is_some() || self.entries.is_empty());
            }
        }
    }

    /// Terminates the comparison and yields the accumulated result.
    pub fn into_result(self) -> DiffResult<T> {
        DiffResult::new(self.entries, self.restrained)
    }

    /// Emits the minimal edit script for the given window slices, in
    /// position order, by divide and conquer around the middle snake.
    fn run_slices(
        &mut self,
        left_start: usize,
        left_end: usize,
        right_start: usize,
        right_end: usize,
    ) {
        match self.find_snake(left_start, left_end, right_start, right_end) {
            Some(snake)
                if !snake.is_degenerate(
                    left_start as isize,
                    left_end as isize,
                    right_start as isize,
                    right_end as isize,
                ) =>
            {
                let snake_start = snake.start as usize;
                let snake_end = snake.end as usize;

                self.run_slices(
                    left_start,
                    snake_start,
                    right_start,
                    (snake.start - snake.diag) as usize,
                );
                self.run_slices(
                    snake_end,
                    left_end,
                    (snake.end - snake.diag) as usize,
                    right_end,
                );

                let matched = snake_end - snake_start;
                if matched > 0 {
                    self.mark_match(self.offset + matched);
                }
            }
            _ => {
                let mut l = left_start;
                let mut r = right_start;

                while l < left_end || r < right_end {
                    if l < left_end && r < right_end && self.elements_equal(l, r) {
                        l += 1;
                        r += 1;
                        self.mark_match(self.offset + l);
                    } else if left_end - left_start > right_end - right_start {
                        // Tie-break: the longer side yields. The
                        // comparison is between the full slice lengths,
                        // constant for this loop; it fixes the
                        // run-length bias of the output.
                        let entry = DiffEntry::delete(self.offset + l, self.left[l].clone());
                        self.entries.push(entry);
                        l += 1;
                    } else {
                        let entry = DiffEntry::insert(self.offset + l, self.right[r].clone());
                        self.entries.push(entry);
                        r += 1;
                    }
                }
            }
        }
    }

    /// Bidirectional middle-snake search over the trace buffers.
    ///
    /// Alternates one forward and one reverse frontier step per edit
    /// distance `d`, extending each step greedily along matching
    /// diagonals. Terminates at the first frontier overlap: for odd
    /// `delta` a forward step checks the mirrored reverse trace, for
    /// even `delta` a reverse step checks the mirrored forward trace.
    fn find_snake(
        &mut self,
        left_start: usize,
        left_end: usize,
        right_start: usize,
        right_end: usize,
    ) -> Option<Snake> {
        let left_start = left_start as isize;
        let left_end = left_end as isize;
        let right_start = right_start as isize;
        let right_end = right_end as isize;

        let left_range = left_end - left_start;
        let right_range = right_end - right_start;
        if left_range <= 0 || right_range <= 0 {
            return None;
        }

        let delta = left_range - right_range;
        let sum = left_range + right_range;
        let offset = (sum + sum % 2) >> 1;

        self.forward[(1 + offset) as usize] = left_start;
        self.reverse[(1 + offset) as usize] = left_end + 1;

        let mut snake = None;
        let mut d = 0;
        while d <= offset && snake.is_none() {
            let mut k = -d;
            while k <= d && snake.is_none() {
                let t = (k + offset) as usize;

                self.forward[t] = if k == -d || (k != d && self.forward[t - 1] < self.forward[t + 1])
                {
                    self.forward[t + 1]
                } else {
                    self.forward[t - 1] + 1
                };

                let mut l = self.forward[t];
                let mut r = l - left_start + right_start - k;
                while l < left_end
                    && r < right_end
                    && self.elements_equal(l as usize, r as usize)
                {
                    l += 1;
                    r += 1;
                    self.forward[t] = l;
                }

                if delta % 2 != 0
                    && delta - d <= k
                    && k <= delta + d
                    && self.reverse[(t as isize - delta) as usize] <= self.forward[t]
                {
                    snake = Some(self.snake_at(
                        self.reverse[(t as isize - delta) as usize],
                        k + left_start - right_start,
                        left_end,
                        right_end,
                    ));
                }
                k += 2;
            }

            let mut k = delta - d;
            while k <= delta + d && snake.is_none() {
                let t = (k + offset - delta) as usize;

                self.reverse[t] = if k == delta - d
                    || (k != delta + d && self.reverse[t + 1] <= self.reverse[t - 1])
                {
                    self.reverse[t + 1] - 1
                } else {
                    self.reverse[t - 1]
                };

                let mut l = self.reverse[t] - 1;
                let mut r = l - left_start + right_start - k;
                while l >= left_start
                    && r >= right_start
                    && self.elements_equal(l as usize, r as usize)
                {
                    self.reverse[t] = l;
                    l -= 1;
                    r -= 1;
                }

                if delta % 2 == 0
                    && -d <= k
                    && k <= d
                    && self.reverse[t] <= self.forward[(t as isize + delta) as usize]
                {
                    snake = Some(self.snake_at(
                        self.reverse[t],
                        k + left_start - right_start,
                        left_end,
                        right_end,
                    ));
                }
                k += 2;
            }
            d += 1;
        }
        snake
    }

    /// Extends the snake starting at `start` on `diag` as far as the
    /// elements keep matching.
    fn snake_at(&self, start: isize, diag: isize, left_end: isize, right_end: isize) -> Snake {
        let mut end = start;
        while end - diag < right_end
            && end < left_end
            && self.elements_equal(end as usize, (end - diag) as usize)
        {
            end += 1;
        }
        Snake { start, end, diag }
    }

    fn elements_equal(&self, l: usize, r: usize) -> bool {
        self.left[l] == self.right[r]
    }

    fn mark_match(&mut self, position: usize) {
        self.max_match = Some(self.max_match.map_or(position, |m| m.max(position)));
    }
}
