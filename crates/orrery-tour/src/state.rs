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

//! The tour snapshot emitted after every step.

use orrery_model::cities::CityIndex;

/// Which phase the solver is in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TourPhase {
    /// Greedy nearest-neighbour construction.
    Construction,
    /// 2-opt local improvement.
    Improvement,
}

impl std::fmt::Display for TourPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourPhase::Construction => write!(f, "Construction"),
            TourPhase::Improvement => write!(f, "Improvement"),
        }
    }
}

/// What the last step did to the tour.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TourAction {
    /// The nearest unvisited city was appended.
    Appended { city: CityIndex },
    /// An edge pair was examined and the exchange would not strictly
    /// shorten the tour.
    ExchangeExamined { i: usize, j: usize, delta: f64 },
    /// An edge pair was examined and the improving exchange was applied.
    ExchangeApplied { i: usize, j: usize, delta: f64 },
}

impl std::fmt::Display for TourAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourAction::Appended { city } => write!(f, "Appended {}", city),
            TourAction::ExchangeExamined { i, j, delta } => {
                write!(f, "Examined ({}, {}) delta {:.3}", i, j, delta)
            }
            TourAction::ExchangeApplied { i, j, delta } => {
                write!(f, "Applied ({}, {}) delta {:.3}", i, j, delta)
            }
        }
    }
}

/// The current visiting order plus bookkeeping.
///
/// `length` is always the closed-loop length of `order` (including the
/// edge back to the start city), recomputed from the distance matrix
/// after every change so that emitted lengths never drift from the
/// order they describe.
#[derive(Clone, PartialEq, Debug)]
pub struct TourState {
    order: Vec<CityIndex>,
    length: f64,
    phase: TourPhase,
    last_action: Option<TourAction>,
}

impl TourState {
    pub(crate) fn new(order: Vec<CityIndex>, length: f64) -> Self {
        Self {
            order,
            length,
            phase: TourPhase::Construction,
            last_action: None,
        }
    }

    /// Returns the visiting order.
    #[inline(always)]
    pub fn order(&self) -> &[CityIndex] {
        &self.order
    }

    /// Returns the closed-loop tour length.
    #[inline(always)]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the phase the solver is in.
    #[inline(always)]
    pub fn phase(&self) -> TourPhase {
        self.phase
    }

    /// Returns the action the last step applied.
    #[inline(always)]
    pub fn last_action(&self) -> Option<TourAction> {
        self.last_action
    }

    pub(crate) fn order_mut(&mut self) -> &mut Vec<CityIndex> {
        &mut self.order
    }

    pub(crate) fn record(&mut self, length: f64, phase: TourPhase, action: TourAction) {
        self.length = length;
        self.phase = phase;
        self.last_action = Some(action);
    }
}

impl std::fmt::Display for TourState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TourState({}, cities: {}, length: {:.3}",
            self.phase,
            self.order.len(),
            self.length
        )?;
        if let Some(action) = self.last_action {
            write!(f, ", last: {}", action)?;
        }
        write!(f, ")")
    }
}
