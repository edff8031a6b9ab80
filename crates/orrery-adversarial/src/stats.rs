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

/// Statistics collected during one adversarial search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdversarialStatistics {
    /// Child nodes created by expansion.
    pub nodes_expanded: u64,
    /// Leaves statically evaluated (terminal position or depth limit).
    pub leaves_evaluated: u64,
    /// Values propagated from fully explored nodes.
    pub propagations: u64,
    /// Nodes that stopped generating children on a closed window.
    pub prunings: u64,
    /// The deepest frame stack reached.
    pub max_depth: u64,
}

impl AdversarialStatistics {
    #[inline]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded = self.nodes_expanded.saturating_add(1);
    }

    #[inline]
    pub fn on_leaf_evaluated(&mut self) {
        self.leaves_evaluated = self.leaves_evaluated.saturating_add(1);
    }

    #[inline]
    pub fn on_propagation(&mut self) {
        self.propagations = self.propagations.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning(&mut self) {
        self.prunings = self.prunings.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    /// Total nodes the search visited (expanded children plus the root).
    #[inline]
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_expanded.saturating_add(1)
    }
}

impl std::fmt::Display for AdversarialStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Adversarial Search Statistics:")?;
        writeln!(f, "  Nodes expanded:    {}", self.nodes_expanded)?;
        writeln!(f, "  Leaves evaluated:  {}", self.leaves_evaluated)?;
        writeln!(f, "  Propagations:      {}", self.propagations)?;
        writeln!(f, "  Prunings:          {}", self.prunings)?;
        writeln!(f, "  Max depth reached: {}", self.max_depth)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut s = AdversarialStatistics::default();
        s.on_node_expanded();
        s.on_node_expanded();
        s.on_leaf_evaluated();
        s.on_propagation();
        s.on_pruning();
        s.on_depth_update(4);

        assert_eq!(s.nodes_expanded, 2);
        assert_eq!(s.nodes_visited(), 3);
        assert_eq!(s.leaves_evaluated, 1);
        assert_eq!(s.propagations, 1);
        assert_eq!(s.prunings, 1);
        assert_eq!(s.max_depth, 4);
    }
}
