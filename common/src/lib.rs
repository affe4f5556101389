pub mod best_score;
pub mod config;
pub mod games;
pub mod logger;

pub use best_score::{BestScoreStore, MemoryBestScoreStore, StorageError, YamlBestScoreStore};
