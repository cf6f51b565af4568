mod alert;
mod game;
mod movie;
mod question;

pub use alert::{AlertAction, AlertModel};
pub use game::{GameResult, StatisticsRecord};
pub use movie::{MostPopularMovies, Movie};
pub use question::{Question, QuizStepViewModel};
