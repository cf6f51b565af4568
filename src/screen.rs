//! View state of the quiz screen.
//!
//! The UI renders straight from [`Screen`]; the presenter drives it through
//! the [`DisplaySurface`] trait.

use std::time::Duration;

use tracing::debug;

use crate::display::DisplaySurface;
use crate::events::{Deferred, EventSender};
use crate::models::{AlertModel, QuizStepViewModel};
use crate::scheduler::Scheduler;

/// How long the answer highlight stays before moving on.
pub const FEEDBACK_DELAY: Duration = Duration::from_secs(1);

pub struct Screen {
    step: Option<QuizStepViewModel>,
    loading: bool,
    input_enabled: bool,
    /// `Some(is_correct)` while the last answer is being highlighted.
    highlight: Option<bool>,
    correct_answers: usize,
    alert: Option<AlertModel>,
    scheduler: Scheduler,
}

impl Screen {
    pub fn new(events: EventSender) -> Self {
        Self {
            step: None,
            loading: false,
            input_enabled: true,
            highlight: None,
            correct_answers: 0,
            alert: None,
            scheduler: Scheduler::new(events),
        }
    }

    pub fn step(&self) -> Option<&QuizStepViewModel> {
        self.step.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn highlight(&self) -> Option<bool> {
        self.highlight
    }

    pub fn correct_answers(&self) -> usize {
        self.correct_answers
    }

    pub fn alert(&self) -> Option<&AlertModel> {
        self.alert.as_ref()
    }

    /// Whether a yes/no answer would be taken right now.
    pub fn accepts_input(&self) -> bool {
        self.input_enabled
            && !self.loading
            && self.alert.is_none()
            && self.highlight.is_none()
            && self.step.is_some()
    }

    pub fn show_loading(&mut self) {
        self.loading = true;
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    pub fn take_alert(&mut self) -> Option<AlertModel> {
        self.alert.take()
    }

    /// Back to a fresh session: no score, no pending timers.
    pub fn reset_session(&mut self) {
        self.scheduler.cancel_all();
        self.correct_answers = 0;
        self.highlight = None;
        self.input_enabled = true;
    }
}

impl DisplaySurface for Screen {
    fn show(&mut self, step: QuizStepViewModel) {
        debug!("Showing question {}", step.position_label);
        self.step = Some(step);
        self.highlight = None;
        self.loading = false;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn report_answer_outcome(&mut self, is_correct: bool) {
        if is_correct {
            self.correct_answers += 1;
        }
        self.highlight = Some(is_correct);
        self.scheduler.defer(FEEDBACK_DELAY, Deferred::AdvanceOrFinish);
    }

    fn show_summary_dialog(&mut self, message: String) {
        self.alert = Some(AlertModel::summary(message));
    }

    fn show_error_dialog(&mut self, message: String) {
        self.loading = false;
        self.alert = Some(AlertModel::error(message));
    }

    fn defer(&mut self, delay: Duration, task: Deferred) {
        self.scheduler.defer(delay, task);
    }
}
