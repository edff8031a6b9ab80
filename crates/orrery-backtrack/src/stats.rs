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

/// Statistics collected during one backtracking run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BacktrackStatistics {
    /// Candidate placements attempted (accepted + rejected).
    pub attempts: u64,
    /// Candidates that passed the constraint check.
    pub accepted: u64,
    /// Candidates discarded by the constraint check.
    pub rejected: u64,
    /// Levels abandoned after their candidates ran out.
    pub backtracks: u64,
    /// Full consistent placements reached.
    pub solutions_found: u64,
    /// The deepest placement depth reached.
    pub max_depth: u64,
}

impl BacktrackStatistics {
    #[inline]
    pub fn on_accepted(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
        self.accepted = self.accepted.saturating_add(1);
    }

    #[inline]
    pub fn on_rejected(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
        self.rejected = self.rejected.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }
}

impl std::fmt::Display for BacktrackStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Backtracking Statistics:")?;
        writeln!(f, "  Attempts:          {}", self.attempts)?;
        writeln!(f, "  Accepted:          {}", self.accepted)?;
        writeln!(f, "  Rejected:          {}", self.rejected)?;
        writeln!(f, "  Backtracks:        {}", self.backtracks)?;
        writeln!(f, "  Solutions found:   {}", self.solutions_found)?;
        writeln!(f, "  Max depth reached: {}", self.max_depth)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut s = BacktrackStatistics::default();
        s.on_accepted();
        s.on_accepted();
        s.on_rejected();
        s.on_backtrack();
        s.on_solution_found();
        s.on_depth_update(3);
        s.on_depth_update(2);

        assert_eq!(s.attempts, 3);
        assert_eq!(s.accepted, 2);
        assert_eq!(s.rejected, 1);
        assert_eq!(s.backtracks, 1);
        assert_eq!(s.solutions_found, 1);
        assert_eq!(s.max_depth, 3);
    }

    #[test]
    fn test_display_renders_all_counters() {
        let s = BacktrackStatistics {
            attempts: 10,
            accepted: 4,
            rejected: 6,
            backtracks: 2,
            solutions_found: 1,
            max_depth: 4,
        };
        let rendered = format!("{}", s);
        assert!(rendered.contains("Attempts:          10"));
        assert!(rendered.contains("Solutions found:   1"));
    }
}
