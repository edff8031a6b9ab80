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

//! # Orrery-Control: the external-facing orchestrator
//!
//! The presentation layer (excluded from this workspace) talks to one
//! `Controller` per game session. The controller validates construction
//! parameters, owns exactly one concrete engine instance, dispatches the
//! capability operations (`step`, `run_to_completion`, `pause`,
//! `resume`, `cancel`, `reset`) to it, and fans every emitted state out
//! to any number of subscribers as a unified `SearchState`.
//!
//! ## Usage
//!
//! ```rust
//! use orrery_control::controller::Controller;
//! use orrery_control::params::{Parameters, SolverKind};
//! use orrery_backtrack::solver::SearchMode;
//! use orrery_engine::status::RunStatus;
//!
//! let mut controller = Controller::create(
//!     SolverKind::EightQueens,
//!     Parameters::EightQueens { board_size: 6, mode: SearchMode::FirstSolution },
//! ).unwrap();
//!
//! let (status, state) = controller.run_to_completion(100_000).unwrap();
//! assert_eq!(status, RunStatus::Solved);
//! println!("{}", state);
//! ```
//!
//! Concurrency model: cooperative single-stepping. The caller owns the
//! cadence (e.g. a UI timer calling `step()`); lifecycle calls are
//! serialized against stepping by `&mut self` through the single owning
//! controller, so a run record can never be torn.

pub mod controller;
pub mod params;
pub mod state;
