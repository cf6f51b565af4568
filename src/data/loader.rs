use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::models::{MostPopularMovies, Movie};

pub const DEFAULT_IMDB_URL: &str = "https://tv-api.com/en/API/Top250Movies";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read movies: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse movies: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Api(String),

    #[error("The movie list is empty")]
    Empty,
}

/// Anything that can produce the list of movies questions are drawn from.
#[async_trait]
pub trait MoviesLoader: Send + Sync {
    async fn load_movies(&self) -> Result<Vec<Movie>, LoadError>;
}

/// Fetches the IMDb Top-250 list.
pub struct ImdbMoviesLoader {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ImdbMoviesLoader {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.api_key)
    }
}

#[async_trait]
impl MoviesLoader for ImdbMoviesLoader {
    async fn load_movies(&self) -> Result<Vec<Movie>, LoadError> {
        let response = self
            .client
            .get(self.url())
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        let movies = parse_movies(&body)?;
        info!("Loaded {} movies from IMDb", movies.len());
        Ok(movies)
    }
}

/// Reads the same JSON shape the IMDb API returns from a local file.
pub struct FileMoviesLoader {
    path: PathBuf,
}

impl FileMoviesLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl MoviesLoader for FileMoviesLoader {
    async fn load_movies(&self) -> Result<Vec<Movie>, LoadError> {
        let content = tokio::fs::read(&self.path).await?;
        let movies = parse_movies(&content)?;
        info!("Loaded {} movies from {}", movies.len(), self.path.display());
        Ok(movies)
    }
}

pub fn parse_movies(json: &[u8]) -> Result<Vec<Movie>, LoadError> {
    let response: MostPopularMovies = serde_json::from_slice(json)?;

    if !response.error_message.is_empty() {
        return Err(LoadError::Api(response.error_message));
    }

    if response.items.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(response.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIES_JSON: &str = r#"{
        "items": [
            { "fullTitle": "The Godfather (1972)", "imDbRating": "9.2", "image": "" },
            { "fullTitle": "Kill Bill (2003)", "imDbRating": "8.1", "image": "" }
        ],
        "errorMessage": ""
    }"#;

    #[test]
    fn test_parse_movies() {
        let movies = parse_movies(MOVIES_JSON.as_bytes()).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].title, "Kill Bill (2003)");
    }

    #[test]
    fn test_api_error_message() {
        let json = r#"{ "items": [], "errorMessage": "Invalid API Key" }"#;
        let err = parse_movies(json.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Api(ref msg) if msg == "Invalid API Key"));
        assert_eq!(err.to_string(), "Invalid API Key");
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let json = r#"{ "items": [], "errorMessage": "" }"#;
        assert!(matches!(
            parse_movies(json.as_bytes()),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_movies(b"{"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_imdb_url() {
        let loader = ImdbMoviesLoader::new(reqwest::Client::new(), "https://example.com/api/", "k_123");
        assert_eq!(loader.url(), "https://example.com/api/k_123");
    }

    #[tokio::test]
    async fn test_file_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");
        std::fs::write(&path, MOVIES_JSON).unwrap();

        let movies = FileMoviesLoader::new(&path).load_movies().await.unwrap();
        assert_eq!(movies.len(), 2);
    }

    #[tokio::test]
    async fn test_file_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileMoviesLoader::new(dir.path().join("missing.json"))
            .load_movies()
            .await;
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
