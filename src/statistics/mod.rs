mod service;
mod store;

pub use service::StatisticService;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StatisticsError};
