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

use crate::{emitter::StepEmitter, status::RunStatus};
use std::time::{Duration, Instant};

/// A progress-table emitter for terminal runs.
///
/// Prints a header once and then one line per interval (always including
/// the step that ends the run), keeping long visualization runs readable
/// without drowning the terminal. States are rendered through their
/// `Display` impl on a single line.
#[derive(Debug, Clone)]
pub struct LogStepEmitter {
    start_time: Instant,
    last_log_time: Option<Instant>,
    log_interval: Duration,
    steps_seen: u64,
    header_printed: bool,
}

impl LogStepEmitter {
    pub fn new(log_interval: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: None,
            log_interval,
            steps_seen: 0,
            header_printed: false,
        }
    }

    #[inline(always)]
    fn print_header(&mut self) {
        println!(
            "{:<9} | {:<10} | {:<10} | {}",
            "Elapsed", "Steps", "Status", "State"
        );
        println!("{}", "-".repeat(64));
        self.header_printed = true;
    }

    #[inline(always)]
    fn log_line<S>(&mut self, state: &S, status: RunStatus)
    where
        S: std::fmt::Display,
    {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let state_field = format!("{}", state).replace('\n', " / ");

        println!(
            "{:<9} | {:<10} | {:<10} | {}",
            format!("{:.1}s", elapsed),
            self.steps_seen,
            format!("{}", status),
            state_field
        );

        self.last_log_time = Some(now);
    }
}

impl Default for LogStepEmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

impl<S> StepEmitter<S> for LogStepEmitter
where
    S: std::fmt::Display,
{
    fn name(&self) -> &str {
        "LogStepEmitter"
    }

    fn emit(&mut self, state: &S, status: RunStatus) {
        self.steps_seen = self.steps_seen.saturating_add(1);

        if !self.header_printed {
            self.print_header();
        }

        let due = match self.last_log_time {
            Some(last) => last.elapsed() >= self.log_interval,
            None => true,
        };

        if due || status.is_terminal() {
            self.log_line(state, status);
        }
    }
}

impl std::fmt::Display for LogStepEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogStepEmitter(log_interval: {}ms)",
            self.log_interval.as_millis()
        )
    }
}
