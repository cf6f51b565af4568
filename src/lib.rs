//! # movie-quiz
//!
//! A terminal movie trivia game: ten yes/no questions about IMDb ratings per
//! round, with statistics kept across runs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use movie_quiz::{MovieQuiz, QuizConfig, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let config = QuizConfig::new(None, None, Some("movies.json".into()), None)?;
//!
//!     // Run the quiz in the terminal
//!     MovieQuiz::new(config).run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
pub mod data;
pub mod display;
pub mod events;
pub mod models;
pub mod presenter;
mod scheduler;
pub mod screen;
pub mod statistics;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use thiserror::Error;
use tracing::info;

pub use app::App;
pub use config::{ConfigError, QuizConfig, SourceConfig};
pub use data::{LoadError, QuestionFactory, QuestionSource};
pub use models::{GameResult, Question, QuizStepViewModel, StatisticsRecord};
pub use statistics::{JsonFileStore, StatisticService, StatisticsError};

use data::{FileMoviesLoader, ImdbMoviesLoader, MoviesLoader};
use events::EventReceiver;

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Statistics error: {0}")]
    Statistics(#[from] StatisticsError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A configured quiz that can be run in the terminal.
pub struct MovieQuiz {
    config: QuizConfig,
}

impl MovieQuiz {
    pub fn new(config: QuizConfig) -> Self {
        Self { config }
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits. Must be called from within a tokio runtime.
    pub async fn run(self) -> Result<(), QuizError> {
        let store = JsonFileStore::open(&self.config.stats_path)?;
        let statistics = StatisticService::new(Box::new(store));

        let (sender, mut receiver) = events::channel();
        let client = reqwest::Client::new();
        let loader: Arc<dyn MoviesLoader> = match &self.config.source {
            SourceConfig::Imdb { base_url, api_key } => Arc::new(ImdbMoviesLoader::new(
                client.clone(),
                base_url.clone(),
                api_key.clone(),
            )),
            SourceConfig::File(path) => Arc::new(FileMoviesLoader::new(path)),
        };
        let factory = QuestionFactory::new(loader, client, sender.clone());
        let mut app = App::new(Box::new(factory), statistics, sender);

        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut app, &mut receiver).await;
        terminal::restore()?;
        info!("Quiz closed");
        result
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    events: &mut EventReceiver,
) -> Result<(), QuizError> {
    let mut input = EventStream::new();
    app.start();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_input(app, key.code) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = events.recv() => app.handle_event(event),
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        _ => {}
    }

    if app.screen().alert().is_some() {
        handle_alert_input(app, key);
    } else {
        handle_quiz_input(app, key);
    }
    false
}

fn handle_alert_input(app: &mut App, key: KeyCode) {
    if matches!(key, KeyCode::Enter | KeyCode::Char(' ')) {
        app.confirm_alert();
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Right => app.answer_yes(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Left => app.answer_no(),
        _ => {}
    }
}
