// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use orrery_model::board::Square;

/// A frame-structured LIFO stack of untried placement candidates.
///
/// `CandidateStack` stores all enqueued candidates linearly and uses a
/// `frames` index stack to mark decision-level boundaries: `frames[i]`
/// records the index in `entries` where depth `i` began. Popping a frame
/// truncates `entries` back to that start index, discarding whatever
/// candidates the abandoned level still held.
///
/// This is the piece that replaces call-stack recursion: the depth of the
/// frame stack *is* the recursion depth, held as data so the search can be
/// suspended between any two steps.
#[derive(Clone, Debug, Default)]
pub struct CandidateStack {
    /// The linear stack of pending candidates.
    entries: Vec<Square>,
    /// A stack of indices pointing to `entries`.
    frames: Vec<usize>,
}

impl CandidateStack {
    /// Creates a new, empty `CandidateStack`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a preallocated stack based on problem size.
    ///
    /// `depth` is the maximum number of simultaneous levels and
    /// `branching` the candidate count per level; preallocation only
    /// moves allocation cost to construction time.
    #[inline]
    pub fn preallocated(depth: usize, branching: usize) -> Self {
        Self {
            entries: Vec::with_capacity(depth.saturating_mul(branching)),
            frames: Vec::with_capacity(depth.saturating_add(1)),
        }
    }

    /// Returns the number of pending candidates across all levels.
    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns the current search depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no frames are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Marks the start of a new decision level.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Pops the current level, truncating `entries` back to the start
    /// index recorded for it.
    #[inline]
    pub fn pop_frame(&mut self) -> Option<()> {
        let start = self.frames.pop()?;
        if self.entries.len() > start {
            self.entries.truncate(start);
        }
        Some(())
    }

    /// Pushes a single candidate onto the current level.
    #[inline]
    pub fn push(&mut self, candidate: Square) {
        self.entries.push(candidate);
    }

    /// Pops the next candidate (LIFO) from the current level.
    ///
    /// Returns `None` when the current level has no candidates left; the
    /// caller must not pop across a frame boundary.
    #[inline]
    pub fn pop(&mut self) -> Option<Square> {
        if self.is_current_level_empty() {
            return None;
        }
        self.entries.pop()
    }

    /// Returns true if the current level has no remaining candidates.
    #[inline]
    pub fn is_current_level_empty(&self) -> bool {
        match self.frames.last() {
            Some(&start) => self.entries.len() == start,
            None => true,
        }
    }

    /// Returns a slice of the candidates in the current level.
    #[inline]
    pub fn current_level_entries(&self) -> &[Square] {
        match self.frames.last() {
            Some(&start) => &self.entries[start..],
            None => &[],
        }
    }

    /// Clears all entries and frames, keeping allocated capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }
}

impl std::fmt::Display for CandidateStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CandidateStack(entries: {}, depth: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}
