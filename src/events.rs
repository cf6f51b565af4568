//! Events delivered to the UI event loop.
//!
//! Background work (movie loading, poster fetches, timers) never touches UI
//! state directly. It posts one of these onto the single unbounded channel
//! that the event loop drains.

use tokio::sync::mpsc;

use crate::models::{Question, QuizStepViewModel};

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

/// A task posted by the presenter or the screen for a later UI turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Render a freshly converted question.
    Show(QuizStepViewModel),
    /// Re-enable the yes/no controls after an answer.
    EnableInput,
    /// Move on to the next question, or finish the session.
    AdvanceOrFinish,
}

#[derive(Debug)]
pub enum AppEvent {
    /// The movie list is loaded and questions can be requested.
    DataLoaded,
    /// Loading the movie list failed.
    LoadFailed(String),
    /// The next question, or `None` if the source had nothing to deliver.
    QuestionReceived(Option<Question>),
    Deferred(Deferred),
}

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
