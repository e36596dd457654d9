//! Viewer state: the trace, the source text, and the navigation cursor.

use crate::trace::{Trace, TraceStep};

/// Application state for the trace viewer.
#[derive(Debug)]
pub struct App {
    /// The finished trace being navigated.
    pub trace: Trace,
    /// Source lines of the traced file, for the highlight pane.
    pub source_lines: Vec<String>,
    /// Display name of the traced file.
    pub file_name: String,
    /// Index of the current step within the trace.
    pub step_index: usize,
}

impl App {
    pub fn new(trace: Trace, source: &str, file_name: &str) -> Self {
        Self {
            trace,
            source_lines: source.lines().map(str::to_string).collect(),
            file_name: file_name.to_string(),
            step_index: 0,
        }
    }

    pub fn current_step(&self) -> Option<&TraceStep> {
        self.trace.steps.get(self.step_index)
    }

    /// 1-based source line of the current step.
    pub fn current_line(&self) -> u32 {
        self.current_step().map(|s| s.line).unwrap_or(1)
    }

    // Navigation clamps at both ends instead of wrapping.

    pub fn next_step(&mut self) {
        if self.step_index + 1 < self.trace.len() {
            self.step_index += 1;
        }
    }

    pub fn prev_step(&mut self) {
        if self.step_index > 0 {
            self.step_index -= 1;
        }
    }

    pub fn first_step(&mut self) {
        self.step_index = 0;
    }

    pub fn last_step(&mut self) {
        self.step_index = self.trace.len().saturating_sub(1);
    }

    pub fn at_start(&self) -> bool {
        self.step_index == 0
    }

    pub fn at_end(&self) -> bool {
        self.step_index + 1 >= self.trace.len()
    }
}
