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

//! The peg snapshot emitted after every Tower of Hanoi step.

/// One of the three pegs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Peg {
    Left,
    Middle,
    Right,
}

impl Peg {
    /// Returns the array index of this peg.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        match self {
            Peg::Left => 0,
            Peg::Middle => 1,
            Peg::Right => 2,
        }
    }

    /// Returns the peg that is neither `a` nor `b`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `a == b`.
    #[inline]
    pub fn other(a: Peg, b: Peg) -> Peg {
        debug_assert!(a != b, "called `Peg::other` with identical pegs: {}", a);
        match 3 - a.index() - b.index() {
            0 => Peg::Left,
            1 => Peg::Middle,
            _ => Peg::Right,
        }
    }
}

impl std::fmt::Display for Peg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Peg::Left => write!(f, "Left"),
            Peg::Middle => write!(f, "Middle"),
            Peg::Right => write!(f, "Right"),
        }
    }
}

/// A single disk move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DiskMove {
    pub disk: u8,
    pub from: Peg,
    pub to: Peg,
}

impl std::fmt::Display for DiskMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "disk {} {} -> {}", self.disk, self.from, self.to)
    }
}

/// What the last step did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HanoiAction {
    /// A transfer frame was expanded into its three sub-tasks.
    Expanded { count: u8 },
    /// A disk was moved between pegs.
    Moved(DiskMove),
}

impl std::fmt::Display for HanoiAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HanoiAction::Expanded { count } => write!(f, "Expanded transfer of {}", count),
            HanoiAction::Moved(mv) => write!(f, "Moved {}", mv),
        }
    }
}

/// The three pegs plus bookkeeping.
///
/// Disks are numbered `1..=n` from smallest to largest and stored bottom
/// to top, so every peg vector is strictly decreasing.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HanoiState {
    pegs: [Vec<u8>; 3],
    moves_done: u64,
    last_action: Option<HanoiAction>,
}

impl HanoiState {
    /// Creates the initial state with all `num_disks` disks on `from`.
    pub fn new(num_disks: u8, from: Peg) -> Self {
        let mut pegs = [Vec::new(), Vec::new(), Vec::new()];
        pegs[from.index()] = (1..=num_disks).rev().collect();
        Self {
            pegs,
            moves_done: 0,
            last_action: None,
        }
    }

    /// Returns the disks on the given peg, bottom to top.
    #[inline]
    pub fn peg(&self, peg: Peg) -> &[u8] {
        &self.pegs[peg.index()]
    }

    /// Returns the number of disk moves performed.
    #[inline(always)]
    pub fn moves_done(&self) -> u64 {
        self.moves_done
    }

    /// Returns the action the last step applied.
    #[inline(always)]
    pub fn last_action(&self) -> Option<HanoiAction> {
        self.last_action
    }

    pub(crate) fn record_expansion(&mut self, count: u8) {
        self.last_action = Some(HanoiAction::Expanded { count });
    }

    /// Moves the top disk from one peg to another.
    ///
    /// Fails when the source peg is empty or the move would place a disk
    /// on a smaller one; both indicate a frame-stack bug.
    pub(crate) fn apply_move(&mut self, from: Peg, to: Peg) -> Result<DiskMove, String> {
        let disk = match self.pegs[from.index()].last() {
            Some(&disk) => disk,
            None => return Err(format!("move from empty peg {}", from)),
        };
        if let Some(&resident) = self.pegs[to.index()].last() {
            if resident < disk {
                return Err(format!(
                    "disk {} placed on smaller disk {} at peg {}",
                    disk, resident, to
                ));
            }
        }

        self.pegs[from.index()].pop();
        self.pegs[to.index()].push(disk);
        self.moves_done += 1;
        let mv = DiskMove { disk, from, to };
        self.last_action = Some(HanoiAction::Moved(mv));
        Ok(mv)
    }
}

impl std::fmt::Display for HanoiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HanoiState(L: {}, M: {}, R: {}, moves: {})",
            self.pegs[0].len(),
            self.pegs[1].len(),
            self.pegs[2].len(),
            self.moves_done
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_stacks_all_disks_on_from() {
        let s = HanoiState::new(4, Peg::Left);
        assert_eq!(s.peg(Peg::Left), &[4, 3, 2, 1]);
        assert!(s.peg(Peg::Middle).is_empty());
        assert!(s.peg(Peg::Right).is_empty());
        assert_eq!(s.moves_done(), 0);
    }

    #[test]
    fn test_apply_move_transfers_the_top_disk() {
        let mut s = HanoiState::new(2, Peg::Left);
        let mv = s.apply_move(Peg::Left, Peg::Middle).unwrap();
        assert_eq!(
            mv,
            DiskMove {
                disk: 1,
                from: Peg::Left,
                to: Peg::Middle
            }
        );
        assert_eq!(s.peg(Peg::Left), &[2]);
        assert_eq!(s.peg(Peg::Middle), &[1]);
        assert_eq!(s.moves_done(), 1);
    }

    #[test]
    fn test_illegal_moves_are_rejected() {
        let mut s = HanoiState::new(2, Peg::Left);
        s.apply_move(Peg::Left, Peg::Middle).unwrap();
        // Disk 2 on top of disk 1 is illegal.
        let err = s.apply_move(Peg::Left, Peg::Middle).unwrap_err();
        assert!(err.contains("smaller disk"));
        // Moving from an empty peg is illegal.
        let err = s.apply_move(Peg::Right, Peg::Left).unwrap_err();
        assert!(err.contains("empty peg"));
    }

    #[test]
    fn test_other_peg() {
        assert_eq!(Peg::other(Peg::Left, Peg::Right), Peg::Middle);
        assert_eq!(Peg::other(Peg::Left, Peg::Middle), Peg::Right);
        assert_eq!(Peg::other(Peg::Middle, Peg::Right), Peg::Left);
    }
}
