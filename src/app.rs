use tracing::{debug, error, info};
use uuid::Uuid;

use crate::data::QuestionSource;
use crate::display::DisplaySurface;
use crate::events::{AppEvent, Deferred, EventSender};
use crate::models::AlertAction;
use crate::presenter::QuizPresenter;
use crate::screen::Screen;
use crate::statistics::StatisticService;

/// Ties the presenter, the screen, the question source and the statistics
/// together, and reacts to everything arriving on the event queue.
pub struct App {
    presenter: QuizPresenter,
    screen: Screen,
    source: Box<dyn QuestionSource>,
    statistics: StatisticService,
    session_id: Uuid,
}

impl App {
    pub fn new(
        source: Box<dyn QuestionSource>,
        statistics: StatisticService,
        events: EventSender,
    ) -> Self {
        Self {
            presenter: QuizPresenter::new(),
            screen: Screen::new(events),
            source,
            statistics,
            session_id: Uuid::new_v4(),
        }
    }

    pub fn presenter(&self) -> &QuizPresenter {
        &self.presenter
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn statistics(&self) -> &StatisticService {
        &self.statistics
    }

    /// Kick off the first load.
    pub fn start(&mut self) {
        info!(session = %self.session_id, "Starting quiz");
        self.screen.show_loading();
        self.source.load_data();
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::DataLoaded => {
                debug!("Movies loaded");
                self.source.request_next_question();
            }
            AppEvent::LoadFailed(message) => {
                error!(session = %self.session_id, "Loading failed: {}", message);
                self.screen.show_error_dialog(message);
            }
            AppEvent::QuestionReceived(question) => {
                self.presenter.receive_question(question, &mut self.screen);
            }
            AppEvent::Deferred(task) => self.handle_deferred(task),
        }
    }

    pub fn answer_yes(&mut self) {
        if self.screen.accepts_input() {
            self.presenter.yes_clicked(&mut self.screen);
        }
    }

    pub fn answer_no(&mut self) {
        if self.screen.accepts_input() {
            self.presenter.no_clicked(&mut self.screen);
        }
    }

    /// Run the open dialog's action, if a dialog is open.
    pub fn confirm_alert(&mut self) {
        let Some(alert) = self.screen.take_alert() else {
            return;
        };

        self.presenter.reset();
        self.screen.reset_session();
        self.screen.show_loading();
        self.session_id = Uuid::new_v4();

        match alert.action {
            AlertAction::PlayAgain => {
                info!(session = %self.session_id, "Starting new round");
                self.source.request_next_question();
            }
            AlertAction::Retry => {
                info!(session = %self.session_id, "Retrying load");
                self.source.load_data();
            }
        }
    }

    fn handle_deferred(&mut self, task: Deferred) {
        match task {
            Deferred::Show(step) => self.screen.show(step),
            Deferred::EnableInput => self.screen.set_input_enabled(true),
            Deferred::AdvanceOrFinish => self.show_next_question_or_results(),
        }
    }

    fn show_next_question_or_results(&mut self) {
        self.screen.clear_highlight();

        if self.presenter.is_last_question() {
            self.show_result();
        } else {
            self.presenter.advance();
            self.screen.show_loading();
            self.source.request_next_question();
        }
    }

    fn show_result(&mut self) {
        let correct = self.screen.correct_answers() as u32;
        let total = self.presenter.question_amount() as u32;

        info!(session = %self.session_id, correct, total, "Round finished");
        if let Err(e) = self.statistics.record_game(correct, total) {
            error!("Failed to store statistics: {}", e);
        }

        let message = self.result_message(correct, total);
        self.screen.show_summary_dialog(message);
    }

    fn result_message(&self, correct: u32, total: u32) -> String {
        let record = self.statistics.record();

        let mut lines = vec![
            format!("Your result: {}/{}", correct, total),
            format!("Quizzes played: {}", record.games_count),
        ];
        if let Some(best) = &record.best_game {
            lines.push(format!(
                "Record: {}/{} ({})",
                best.correct,
                best.total,
                best.date_time_string()
            ));
        }
        lines.push(match record.total_accuracy() {
            Some(accuracy) => format!("Average accuracy: {:.2}%", accuracy),
            None => "Average accuracy: n/a".to_string(),
        });

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{self, EventReceiver};
    use crate::models::Question;
    use crate::presenter::QUESTION_AMOUNT;
    use crate::statistics::MemoryStore;

    /// Answers synchronously; every question's correct answer is "yes".
    struct ScriptedSource {
        events: EventSender,
        failures_left: usize,
    }

    impl QuestionSource for ScriptedSource {
        fn load_data(&mut self) {
            let event = if self.failures_left > 0 {
                self.failures_left -= 1;
                AppEvent::LoadFailed("The Internet connection appears to be offline.".to_string())
            } else {
                AppEvent::DataLoaded
            };
            self.events.send(event).unwrap();
        }

        fn request_next_question(&mut self) {
            let question = Question {
                image: vec![0xff, 0xd8],
                text: "Is \"Heat (1995)\" rated higher than 8.0?".to_string(),
                correct_answer: true,
            };
            self.events
                .send(AppEvent::QuestionReceived(Some(question)))
                .unwrap();
        }
    }

    fn app(failures: usize) -> (App, EventReceiver) {
        let (tx, rx) = events::channel();
        let source = ScriptedSource {
            events: tx.clone(),
            failures_left: failures,
        };
        let statistics = StatisticService::new(Box::new(MemoryStore::new()));
        (App::new(Box::new(source), statistics, tx), rx)
    }

    /// Pump events, answering each question as it appears, until a dialog opens.
    async fn play_round(app: &mut App, rx: &mut EventReceiver, correct: usize) -> usize {
        let mut answered = 0;
        while app.screen().alert().is_none() {
            let event = rx.recv().await.unwrap();
            app.handle_event(event);

            if app.screen().accepts_input() {
                if answered < correct {
                    app.answer_yes();
                } else {
                    app.answer_no();
                }
                answered += 1;
            }
        }
        answered
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_round_records_statistics() {
        let (mut app, mut rx) = app(0);
        app.start();

        let answered = play_round(&mut app, &mut rx, 6).await;

        assert_eq!(answered, QUESTION_AMOUNT);
        assert_eq!(app.screen().correct_answers(), 6);
        assert_eq!(app.statistics().games_count(), 1);

        let alert = app.screen().alert().unwrap();
        assert_eq!(alert.action, AlertAction::PlayAgain);
        assert!(alert.message.contains("Your result: 6/10"));
        assert!(alert.message.contains("Quizzes played: 1"));
        assert!(alert.message.contains("Record: 6/10"));
        assert!(alert.message.contains("Average accuracy: 60.00%"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_again_starts_fresh_round() {
        let (mut app, mut rx) = app(0);
        app.start();
        play_round(&mut app, &mut rx, 6).await;

        app.confirm_alert();
        assert_eq!(app.presenter().current_index(), 0);
        assert_eq!(app.screen().correct_answers(), 0);
        assert!(app.screen().is_loading());

        play_round(&mut app, &mut rx, 9).await;

        assert_eq!(app.statistics().games_count(), 2);
        assert_eq!(app.statistics().best_game().unwrap().correct, 9);
        let alert = app.screen().alert().unwrap();
        assert!(alert.message.contains("Your result: 9/10"));
        assert!(alert.message.contains("Average accuracy: 75.00%"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_failure_shows_retry_dialog() {
        let (mut app, mut rx) = app(1);
        app.start();

        let event = rx.recv().await.unwrap();
        app.handle_event(event);

        let alert = app.screen().alert().unwrap();
        assert_eq!(alert.action, AlertAction::Retry);
        assert_eq!(alert.title, "Error");
        assert!(!app.screen().is_loading());

        app.confirm_alert();
        assert!(app.screen().alert().is_none());

        let answered = play_round(&mut app, &mut rx, 10).await;
        assert_eq!(answered, QUESTION_AMOUNT);
        assert_eq!(app.statistics().games_count(), 1);
    }

    #[test]
    fn test_answers_ignored_without_question() {
        let (mut app, _rx) = app(0);

        app.answer_yes();
        app.answer_no();

        assert_eq!(app.screen().correct_answers(), 0);
        assert!(app.screen().input_enabled());
    }

    #[test]
    fn test_confirm_without_dialog_does_nothing() {
        let (mut app, _rx) = app(0);
        app.confirm_alert();
        assert!(!app.screen().is_loading());
    }
}
