/// What happens when the user confirms a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    /// Start a new session with the already loaded movies.
    PlayAgain,
    /// Reload the movie list after a failure.
    Retry,
}

/// A modal dialog shown over the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertModel {
    pub title: String,
    pub message: String,
    pub button_text: String,
    pub action: AlertAction,
}

impl AlertModel {
    pub fn summary(message: String) -> Self {
        Self {
            title: "This round is over!".to_string(),
            message,
            button_text: "Play again".to_string(),
            action: AlertAction::PlayAgain,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            title: "Error".to_string(),
            message,
            button_text: "Try again".to_string(),
            action: AlertAction::Retry,
        }
    }
}
