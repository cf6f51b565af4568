use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::statistics::StatisticsError;

/// Outcome of one completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub correct: u32,
    pub total: u32,
    pub date: DateTime<Utc>,
}

impl GameResult {
    /// Fails when `correct` exceeds `total`.
    pub fn new(correct: u32, total: u32, date: DateTime<Utc>) -> Result<Self, StatisticsError> {
        if correct > total {
            return Err(StatisticsError::InvalidResult { correct, total });
        }
        Ok(Self {
            correct,
            total,
            date,
        })
    }

    /// Ties are not an improvement.
    pub fn is_better_than(&self, other: &GameResult) -> bool {
        self.correct > other.correct
    }

    /// Local date and time in the `dd.mm.yy HH:MM` form used by the summary.
    pub fn date_time_string(&self) -> String {
        self.date
            .with_timezone(&Local)
            .format("%d.%m.%y %H:%M")
            .to_string()
    }
}

/// Aggregate over every recorded session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsRecord {
    pub games_count: u32,
    pub best_game: Option<GameResult>,
    pub cumulative_correct: u64,
    pub cumulative_total: u64,
}

impl StatisticsRecord {
    /// Percentage of correct answers across all games, `None` before the first game.
    pub fn total_accuracy(&self) -> Option<f64> {
        if self.cumulative_total == 0 {
            return None;
        }
        Some(self.cumulative_correct as f64 / self.cumulative_total as f64 * 100.0)
    }
}
