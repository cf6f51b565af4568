use std::time::Duration;

use crate::events::Deferred;
use crate::models::QuizStepViewModel;

/// Everything the presenter needs from whatever is drawing the quiz.
pub trait DisplaySurface {
    fn show(&mut self, step: QuizStepViewModel);

    fn set_input_enabled(&mut self, enabled: bool);

    /// Score the answer and show feedback for it.
    fn report_answer_outcome(&mut self, is_correct: bool);

    fn show_summary_dialog(&mut self, message: String);

    /// The dialog's confirmation retries loading.
    fn show_error_dialog(&mut self, message: String);

    /// Post `task` to the UI queue, `delay` from now. A zero delay means the
    /// next turn of the event loop.
    fn defer(&mut self, delay: Duration, task: Deferred);
}
