//! Quiz progress: which question we're on and what to do with an answer.

use std::time::Duration;

use tracing::debug;

use crate::display::DisplaySurface;
use crate::events::Deferred;
use crate::models::{Question, QuizStepViewModel};

/// Number of rounds in one session.
pub const QUESTION_AMOUNT: usize = 10;

/// How long the yes/no controls stay disabled after an answer.
pub const ANSWER_COOLDOWN: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
pub struct QuizPresenter {
    current_index: usize,
    current_question: Option<Question>,
}

impl QuizPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question_amount(&self) -> usize {
        QUESTION_AMOUNT
    }

    /// 0-based index of the question being shown.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index == QUESTION_AMOUNT - 1
    }

    /// Callers check [`is_last_question`](Self::is_last_question) first.
    pub fn advance(&mut self) {
        self.current_index += 1;
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    pub fn convert(&self, question: &Question) -> QuizStepViewModel {
        QuizStepViewModel {
            image: question.image.clone(),
            question_text: question.text.clone(),
            position_label: format!("{}/{}", self.current_index + 1, QUESTION_AMOUNT),
        }
    }

    /// Takes ownership of the incoming question and posts its view model for
    /// the next UI turn.
    pub fn receive_question(
        &mut self,
        question: Option<Question>,
        display: &mut impl DisplaySurface,
    ) {
        let Some(question) = question else {
            debug!("Ignoring empty question delivery");
            return;
        };

        let step = self.convert(&question);
        self.current_question = Some(question);
        display.defer(Duration::ZERO, Deferred::Show(step));
    }

    pub fn answer(&mut self, is_yes: bool, display: &mut impl DisplaySurface) {
        let Some(question) = &self.current_question else {
            debug!("Ignoring answer without a current question");
            return;
        };
        let is_correct = is_yes == question.correct_answer;

        display.set_input_enabled(false);
        display.defer(ANSWER_COOLDOWN, Deferred::EnableInput);
        display.report_answer_outcome(is_correct);
    }

    pub fn yes_clicked(&mut self, display: &mut impl DisplaySurface) {
        self.answer(true, display);
    }

    pub fn no_clicked(&mut self, display: &mut impl DisplaySurface) {
        self.answer(false, display);
    }
}
