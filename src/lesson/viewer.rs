//! Lesson viewer state machine
//!
//! Walks a lesson step by step. Practice steps hold an editable code buffer
//! and the output of the last simulated run; "next" stays disabled until that
//! output equals the step's expected output.

use tracing::{debug, info};

use super::{Lesson, Step, StepKind};
use crate::latency::{Latency, Pending};

/// Outcome of a `next` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonTransition {
    Moved(usize),
    Blocked,
    /// `next` on the last step
    Completed,
}

pub struct LessonViewer {
    lesson: Lesson,
    position: usize,
    code: String,
    output: String,
    show_hint: bool,
    latency: Latency,
    pending_run: Option<Pending<Option<String>>>,
}

impl LessonViewer {
    pub fn new(lesson: Lesson, latency: Latency) -> Self {
        info!("Opened lesson '{}'", lesson.title);
        Self {
            lesson,
            position: 0,
            code: String::new(),
            output: String::new(),
            show_hint: false,
            latency,
            pending_run: None,
        }
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_step(&self) -> &Step {
        &self.lesson.steps[self.position]
    }

    pub fn is_last_step(&self) -> bool {
        self.position + 1 == self.lesson.steps.len()
    }

    /// Fraction of the lesson reached, counting the current step
    pub fn progress(&self) -> f32 {
        (self.position + 1) as f32 / self.lesson.steps.len() as f32
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    /// Output of the last finished run, empty before the first one
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_running(&self) -> bool {
        self.pending_run.is_some()
    }

    pub fn hint_visible(&self) -> bool {
        self.show_hint
    }

    pub fn toggle_hint(&mut self) -> bool {
        self.show_hint = !self.show_hint;
        self.show_hint
    }

    /// The current output matches what the step expects
    pub fn is_solved(&self) -> bool {
        matches!(self.current_step().expected_output, Some(expected) if expected == self.output)
    }

    /// Whether `next` is enabled
    pub fn can_advance(&self) -> bool {
        match self.current_step().expected_output {
            Some(expected) => self.output == expected,
            None => true,
        }
    }

    /// Start a simulated run of the editor contents.
    ///
    /// Returns false on theory steps, while another run is in flight, or when
    /// there is no tokio runtime to run it on.
    pub fn run(&mut self) -> bool {
        if self.is_running() || self.current_step().kind != StepKind::Practice {
            return false;
        }
        let step = *self.current_step();
        let code = self.code.clone();
        debug!("Running code for step '{}'", step.title);
        self.pending_run = self.latency.defer(self.latency.run_delay, move || step.simulate_run(&code));
        self.pending_run.is_some()
    }

    /// Wait for the in-flight run and apply its output
    pub async fn settle(&mut self) -> &str {
        if let Some(pending) = self.pending_run.take() {
            if let Some(Some(output)) = pending.wait().await {
                self.output = output;
            }
        }
        &self.output
    }

    pub fn next(&mut self) -> LessonTransition {
        if !self.can_advance() {
            return LessonTransition::Blocked;
        }
        if self.is_last_step() {
            info!("Completed lesson '{}'", self.lesson.title);
            self.cancel_run();
            return LessonTransition::Completed;
        }
        self.enter(self.position + 1);
        LessonTransition::Moved(self.position)
    }

    /// Go back one step. No-op on the first step.
    pub fn previous(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.enter(self.position - 1);
        true
    }

    fn enter(&mut self, position: usize) {
        self.cancel_run();
        self.position = position;
        self.code = self.current_step().starter_code.unwrap_or_default().to_string();
        self.output.clear();
        self.show_hint = false;
    }

    fn cancel_run(&mut self) {
        if let Some(mut pending) = self.pending_run.take() {
            pending.cancel();
        }
    }
}
