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

//! Step emission: how engines expose their intermediate states.
//!
//! A `StepEmitter` receives one notification per discrete algorithmic
//! step and decouples the engines from whatever consumes the states
//! (animation, logging, tests). Emitters observe; they never influence
//! the search.

use crate::status::RunStatus;
use std::{cell::RefCell, rc::Rc};

/// Consumer-facing sink receiving one notification per discrete step.
///
/// `emit` is invoked exactly once per step with the state the step
/// produced and the status the run ended the step in. It is never skipped
/// for a state that becomes the final solution. Implementations must be
/// side-effect-bounded: the engine does not depend on what an emitter
/// does with the state.
pub trait StepEmitter<S> {
    /// Returns the name of the emitter.
    fn name(&self) -> &str;
    /// Called once per step with the resulting state and status.
    fn emit(&mut self, state: &S, status: RunStatus);
}

impl<S> std::fmt::Debug for dyn StepEmitter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StepEmitter({})", self.name())
    }
}

/// An emitter that ignores every notification.
///
/// Useful as a default subscriber and in benchmarks where emission
/// overhead must not distort measurements.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpStepEmitter;

impl NoOpStepEmitter {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<S> StepEmitter<S> for NoOpStepEmitter {
    fn name(&self) -> &str {
        "NoOpStepEmitter"
    }

    fn emit(&mut self, _state: &S, _status: RunStatus) {}
}

/// Fans one emission out to any number of registered emitters.
///
/// This is the subscriber list every engine embeds. There is no ordering
/// guarantee between subscribers for the same emitted state.
pub struct CompositeStepEmitter<S> {
    emitters: Vec<Box<dyn StepEmitter<S>>>,
}

impl<S> Default for CompositeStepEmitter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> CompositeStepEmitter<S> {
    /// Creates an empty composite.
    #[inline]
    pub fn new() -> Self {
        Self {
            emitters: Vec::new(),
        }
    }

    /// Registers another emitter.
    #[inline]
    pub fn add_emitter<E>(&mut self, emitter: E)
    where
        E: StepEmitter<S> + 'static,
    {
        self.emitters.push(Box::new(emitter));
    }

    /// Registers an already-boxed emitter.
    #[inline]
    pub fn add_emitter_boxed(&mut self, emitter: Box<dyn StepEmitter<S>>) {
        self.emitters.push(emitter);
    }

    /// Returns the number of registered emitters.
    #[inline]
    pub fn num_emitters(&self) -> usize {
        self.emitters.len()
    }
}

impl<S> StepEmitter<S> for CompositeStepEmitter<S> {
    fn name(&self) -> &str {
        "CompositeStepEmitter"
    }

    fn emit(&mut self, state: &S, status: RunStatus) {
        for emitter in &mut self.emitters {
            emitter.emit(state, status);
        }
    }
}

impl<S> std::fmt::Debug for CompositeStepEmitter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeStepEmitter({} emitters)", self.emitters.len())
    }
}

/// One recorded emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRecord<S> {
    pub state: S,
    pub status: RunStatus,
}

/// Records every emission for later inspection.
///
/// Cloning the emitter shares the underlying record buffer, so a test can
/// keep one handle, hand the clone to an engine, and read the trace after
/// the run. Single-threaded by design, matching the engines' cooperative
/// stepping model.
#[derive(Clone, Debug, Default)]
pub struct RecordingStepEmitter<S> {
    records: Rc<RefCell<Vec<StepRecord<S>>>>,
}

impl<S> RecordingStepEmitter<S> {
    /// Creates an empty recorder.
    #[inline]
    pub fn new() -> Self {
        Self {
            records: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Returns the number of recorded emissions.
    #[inline]
    pub fn num_records(&self) -> usize {
        self.records.borrow().len()
    }

    /// Returns a copy of all recorded emissions.
    pub fn records(&self) -> Vec<StepRecord<S>>
    where
        S: Clone,
    {
        self.records.borrow().clone()
    }

    /// Returns a copy of the recorded states only.
    pub fn states(&self) -> Vec<S>
    where
        S: Clone,
    {
        self.records
            .borrow()
            .iter()
            .map(|r| r.state.clone())
            .collect()
    }

    /// Returns the status of the last emission, if any.
    pub fn last_status(&self) -> Option<RunStatus> {
        self.records.borrow().last().map(|r| r.status)
    }

    /// Clears the record buffer.
    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl<S> StepEmitter<S> for RecordingStepEmitter<S>
where
    S: Clone,
{
    fn name(&self) -> &str {
        "RecordingStepEmitter"
    }

    fn emit(&mut self, state: &S, status: RunStatus) {
        self.records.borrow_mut().push(StepRecord {
            state: state.clone(),
            status,
        });
    }
}
