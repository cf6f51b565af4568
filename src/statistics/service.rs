use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use super::store::{KeyValueStore, StatisticsError};
use crate::models::{GameResult, StatisticsRecord};

const GAMES_COUNT_KEY: &str = "gamesCount";
const CORRECT_KEY: &str = "correct";
const TOTAL_KEY: &str = "total";
const BEST_GAME_KEY: &str = "bestGame";

/// Aggregates finished games into a [`KeyValueStore`].
///
/// Reads are forgiving: a missing or malformed field counts as zero (or no
/// best game). Writes are not transactional; a single writer is assumed.
pub struct StatisticService {
    store: Box<dyn KeyValueStore>,
}

impl StatisticService {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn games_count(&self) -> u32 {
        let count = self.read_u64(GAMES_COUNT_KEY);
        u32::try_from(count).unwrap_or_else(|_| {
            warn!("Ignoring out of range {} value: {}", GAMES_COUNT_KEY, count);
            0
        })
    }

    pub fn best_game(&self) -> Option<GameResult> {
        let value = self.store.get(BEST_GAME_KEY)?;
        match serde_json::from_value(value) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Ignoring malformed {} record: {}", BEST_GAME_KEY, e);
                None
            }
        }
    }

    pub fn total_accuracy(&self) -> Option<f64> {
        self.record().total_accuracy()
    }

    pub fn record(&self) -> StatisticsRecord {
        StatisticsRecord {
            games_count: self.games_count(),
            best_game: self.best_game(),
            cumulative_correct: self.read_u64(CORRECT_KEY),
            cumulative_total: self.read_u64(TOTAL_KEY),
        }
    }

    /// Record one finished session.
    pub fn record_game(&mut self, correct: u32, total: u32) -> Result<(), StatisticsError> {
        let result = GameResult::new(correct, total, Utc::now())?;
        let record = self.record();

        let mut entries = vec![
            (GAMES_COUNT_KEY, json!(record.games_count.saturating_add(1))),
            (
                CORRECT_KEY,
                json!(record.cumulative_correct.saturating_add(u64::from(correct))),
            ),
            (
                TOTAL_KEY,
                json!(record.cumulative_total.saturating_add(u64::from(total))),
            ),
        ];

        let is_new_best = record
            .best_game
            .as_ref()
            .is_none_or(|best| result.is_better_than(best));
        if is_new_best {
            info!("New best game: {}/{}", result.correct, result.total);
            entries.push((BEST_GAME_KEY, serde_json::to_value(&result)?));
        }

        self.store.set_many(entries)?;
        Ok(())
    }

    fn read_u64(&self, key: &str) -> u64 {
        let Some(value) = self.store.get(key) else {
            return 0;
        };
        value.as_u64().unwrap_or_else(|| {
            warn!("Ignoring malformed {} value: {}", key, value);
            0
        })
    }
}
