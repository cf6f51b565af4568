mod factory;
mod loader;

pub use factory::{QuestionFactory, QuestionSource};
pub use loader::{
    DEFAULT_IMDB_URL, FileMoviesLoader, ImdbMoviesLoader, LoadError, MoviesLoader, parse_movies,
};
