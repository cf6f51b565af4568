use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use movie_quiz::{MovieQuiz, QuizConfig, config::default_log_path};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// IMDb API key used to fetch the Top-250 list
    #[arg(long, env = "IMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the Top-250 endpoint
    #[arg(long, env = "IMDB_API_URL")]
    api_url: Option<String>,

    /// JSON file with movies to play offline (same shape as the API response)
    #[arg(short, long)]
    movies: Option<PathBuf>,

    /// Where game statistics are kept
    #[arg(long, env = "MOVIE_QUIZ_STATS")]
    stats: Option<PathBuf>,

    /// Log file; the terminal itself is taken by the game
    #[arg(long, env = "MOVIE_QUIZ_LOG")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_path = match args.log_file.clone() {
        Some(path) => path,
        None => default_log_path().unwrap_or_else(|e| exit_with(e)),
    };
    if let Err(e) = init_logging(&log_path) {
        exit_with(format!("Failed to open log file {}: {}", log_path.display(), e));
    }

    let config = match QuizConfig::new(args.api_key, args.api_url, args.movies, args.stats) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    if let Err(e) = MovieQuiz::new(config).run().await {
        tracing::error!("Quiz failed: {}", e);
        exit_with(format!("Error running quiz: {}", e));
    }
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movie_quiz=info")),
        )
        .init();
    Ok(())
}

fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
