/// A single yes/no round as delivered by the question source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Raw poster bytes. Empty when the poster could not be fetched.
    pub image: Vec<u8>,
    pub text: String,
    pub correct_answer: bool,
}

/// Display-ready form of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizStepViewModel {
    pub image: Vec<u8>,
    pub question_text: String,
    /// "current/total", e.g. "3/10".
    pub position_label: String,
}
