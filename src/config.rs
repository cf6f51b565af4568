use std::path::PathBuf;

use thiserror::Error;

use crate::data::DEFAULT_IMDB_URL;

const APP_DIR: &str = "movie-quiz";
const STATS_FILE: &str = "statistics.json";
const LOG_FILE: &str = "movie-quiz.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No question source: pass --movies <file> or set IMDB_API_KEY")]
    MissingSource,

    #[error("Could not determine a data directory; pass --stats and --log-file explicitly")]
    NoDataDir,
}

/// Where the movies come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Imdb { base_url: String, api_key: String },
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub source: SourceConfig,
    pub stats_path: PathBuf,
}

impl QuizConfig {
    /// A local movies file wins over the API key.
    pub fn new(
        api_key: Option<String>,
        api_url: Option<String>,
        movies: Option<PathBuf>,
        stats_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let source = match (movies, api_key) {
            (Some(path), _) => SourceConfig::File(path),
            (None, Some(api_key)) if !api_key.trim().is_empty() => SourceConfig::Imdb {
                base_url: api_url.unwrap_or_else(|| DEFAULT_IMDB_URL.to_string()),
                api_key: api_key.trim().to_string(),
            },
            _ => return Err(ConfigError::MissingSource),
        };

        let stats_path = match stats_path {
            Some(path) => path,
            None => data_dir()?.join(STATS_FILE),
        };

        Ok(Self { source, stats_path })
    }
}

pub fn default_log_path() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join(LOG_FILE))
}

fn data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(ConfigError::NoDataDir)
}
