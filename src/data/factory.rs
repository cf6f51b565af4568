use std::sync::{Arc, Mutex, PoisonError};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, error, warn};

use super::loader::MoviesLoader;
use crate::events::{AppEvent, EventSender};
use crate::models::{Movie, Question};

/// Rating thresholds are drawn from 8.0..=9.0 in steps of 0.1.
const THRESHOLD_TENTHS: std::ops::RangeInclusive<u32> = 80..=90;

/// Where questions come from. Results are delivered as [`AppEvent`]s.
pub trait QuestionSource {
    /// Load the underlying data; answers with `DataLoaded` or `LoadFailed`.
    fn load_data(&mut self);

    /// Answers with `QuestionReceived`, or `LoadFailed` if nothing is loaded.
    fn request_next_question(&mut self);
}

/// Loaded movies in shuffled order. Drawing past the end reshuffles.
#[derive(Debug, Default)]
struct Deck {
    movies: Vec<Movie>,
    remaining: Vec<Movie>,
}

impl Deck {
    fn fill(&mut self, movies: Vec<Movie>) {
        self.movies = movies;
        self.remaining.clear();
    }

    fn draw(&mut self) -> Option<Movie> {
        if self.remaining.is_empty() {
            if self.movies.is_empty() {
                return None;
            }
            debug!("Reshuffling {} movies", self.movies.len());
            self.remaining = self.movies.clone();
            self.remaining.shuffle(&mut rand::rng());
        }
        self.remaining.pop()
    }
}

/// Turns movies into "is it rated higher than X?" questions.
pub struct QuestionFactory {
    loader: Arc<dyn MoviesLoader>,
    client: reqwest::Client,
    deck: Arc<Mutex<Deck>>,
    events: EventSender,
}

impl QuestionFactory {
    pub fn new(loader: Arc<dyn MoviesLoader>, client: reqwest::Client, events: EventSender) -> Self {
        Self {
            loader,
            client,
            deck: Arc::new(Mutex::new(Deck::default())),
            events,
        }
    }
}

impl QuestionSource for QuestionFactory {
    fn load_data(&mut self) {
        let loader = Arc::clone(&self.loader);
        let deck = Arc::clone(&self.deck);
        let events = self.events.clone();

        tokio::spawn(async move {
            let event = match loader.load_movies().await {
                Ok(movies) => {
                    fill_deck(&deck, movies);
                    AppEvent::DataLoaded
                }
                Err(e) => {
                    error!("Failed to load movies: {}", e);
                    AppEvent::LoadFailed(e.to_string())
                }
            };
            let _ = events.send(event);
        });
    }

    fn request_next_question(&mut self) {
        let movie = self
            .deck
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .draw();
        let Some(movie) = movie else {
            warn!("Question requested before any movies were loaded");
            let _ = self
                .events
                .send(AppEvent::LoadFailed("Movies are not loaded yet".to_string()));
            return;
        };

        let threshold = rand::rng().random_range(THRESHOLD_TENTHS);
        let client = self.client.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let image = fetch_poster(&client, &movie).await;
            let question = make_question(&movie, threshold, image);
            let _ = events.send(AppEvent::QuestionReceived(Some(question)));
        });
    }
}

fn fill_deck(deck: &Mutex<Deck>, movies: Vec<Movie>) {
    deck.lock().unwrap_or_else(PoisonError::into_inner).fill(movies);
}

/// Poster bytes, or nothing if the poster can't be fetched.
async fn fetch_poster(client: &reqwest::Client, movie: &Movie) -> Vec<u8> {
    if movie.image_url.is_empty() {
        return Vec::new();
    }

    let url = movie.resized_image_url();
    let result = async {
        let response = client.get(&url).send().await?.error_for_status()?;
        response.bytes().await
    }
    .await;

    match result {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            warn!("Failed to load poster {}: {}", url, e);
            Vec::new()
        }
    }
}

/// `threshold` is in tenths of a rating point.
fn make_question(movie: &Movie, threshold: u32, image: Vec<u8>) -> Question {
    let rating = (movie.rating_value() * 10.0).round() as u32;

    Question {
        image,
        text: format!(
            "Is \"{}\" rated higher than {}.{}?",
            movie.title,
            threshold / 10,
            threshold % 10
        ),
        correct_answer: rating > threshold,
    }
}
