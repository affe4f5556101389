use serde_yaml_ng::{Mapping, Value};

use crate::config::{ConfigContentProvider, FileContentConfigProvider};
use crate::log;

pub const BEST_SCORE_KEY: &str = "neonSnakeHighScore";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Read(String),
    Write(String),
    Format(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Read(e) => write!(f, "Read error: {}", e),
            StorageError::Write(e) => write!(f, "Write error: {}", e),
            StorageError::Format(e) => write!(f, "Format error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<serde_yaml_ng::Error> for StorageError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        StorageError::Format(e.to_string())
    }
}

/// Persistence for the best score across sessions. Implementations never
/// fail outward: storage problems degrade to an in-memory value.
pub trait BestScoreStore {
    fn load_best_score(&mut self) -> u32;
    fn save_best_score(&mut self, score: u32);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryBestScoreStore {
    best_score: u32,
}

impl MemoryBestScoreStore {
    pub fn new(best_score: u32) -> Self {
        Self { best_score }
    }
}

impl BestScoreStore for MemoryBestScoreStore {
    fn load_best_score(&mut self) -> u32 {
        self.best_score
    }

    fn save_best_score(&mut self, score: u32) {
        self.best_score = score;
    }
}

fn score_key() -> Value {
    Value::String(BEST_SCORE_KEY.to_string())
}

/// Stores the score under [`BEST_SCORE_KEY`] in a YAML mapping. Other keys
/// are kept whatever their values, and a file that does not parse is never
/// overwritten.
pub struct YamlBestScoreStore<TProvider: ConfigContentProvider = FileContentConfigProvider> {
    provider: TProvider,
    cached: u32,
}

impl YamlBestScoreStore<FileContentConfigProvider> {
    pub fn from_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path.to_string()))
    }
}

impl<TProvider: ConfigContentProvider> YamlBestScoreStore<TProvider> {
    pub fn new(provider: TProvider) -> Self {
        Self { provider, cached: 0 }
    }

    fn read_entries(&self) -> Result<Mapping, StorageError> {
        let content = self.provider.get_config_content().map_err(StorageError::Read)?;
        match content {
            Some(content) if !content.trim().is_empty() => Ok(serde_yaml_ng::from_str(&content)?),
            _ => Ok(Mapping::new()),
        }
    }

    pub fn try_load(&self) -> Result<Option<u32>, StorageError> {
        let entries = self.read_entries()?;
        let Some(value) = entries.get(score_key()) else {
            return Ok(None);
        };
        value
            .as_u64()
            .and_then(|score| u32::try_from(score).ok())
            .map(Some)
            .ok_or_else(|| StorageError::Format(format!("{} is not a score: {:?}", BEST_SCORE_KEY, value)))
    }

    pub fn try_save(&self, score: u32) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        entries.insert(score_key(), Value::Number(score.into()));
        let content = serde_yaml_ng::to_string(&entries)?;
        self.provider.set_config_content(&content).map_err(StorageError::Write)
    }
}

impl<TProvider: ConfigContentProvider> BestScoreStore for YamlBestScoreStore<TProvider> {
    fn load_best_score(&mut self) -> u32 {
        match self.try_load() {
            Ok(Some(score)) => self.cached = score,
            Ok(None) => {}
            Err(e) => log!("Best score unavailable, using {}: {}", self.cached, e),
        }
        self.cached
    }

    fn save_best_score(&mut self, score: u32) {
        self.cached = score;
        if let Err(e) = self.try_save(score) {
            log!("Failed to persist best score {}: {}", score, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentProvider;

    struct BrokenProvider;

    impl ConfigContentProvider for BrokenProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Err("storage unavailable".to_string())
        }

        fn set_config_content(&self, _content: &str) -> Result<(), String> {
            Err("storage unavailable".to_string())
        }
    }

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_neon_snake_best_score_{}.yaml", random_number));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_empty_storage_defaults_to_zero() {
        let mut store = YamlBestScoreStore::new(MemoryContentProvider::new());
        assert_eq!(store.load_best_score(), 0);
    }

    #[test]
    fn test_saved_score_is_stored_under_fixed_key() {
        let mut store = YamlBestScoreStore::new(MemoryContentProvider::new());
        store.save_best_score(120);

        let content = store.provider.get_config_content().unwrap().unwrap();
        assert!(content.contains("neonSnakeHighScore: 120"));
        assert_eq!(store.load_best_score(), 120);
    }

    #[test]
    fn test_other_keys_survive_save() {
        let provider = MemoryContentProvider::with_content("otherGame: 7\nneonSnakeHighScore: 3\n");
        let mut store = YamlBestScoreStore::new(provider);
        assert_eq!(store.load_best_score(), 3);
        store.save_best_score(40);

        let content = store.provider.get_config_content().unwrap().unwrap();
        assert!(content.contains("otherGame: 7"));
        assert!(content.contains("neonSnakeHighScore: 40"));
    }

    #[test]
    fn test_non_integer_entries_keep_score_and_survive_save() {
        let provider = MemoryContentProvider::with_content("playerName: neo\nneonSnakeHighScore: 3\n");
        let mut store = YamlBestScoreStore::new(provider);
        assert_eq!(store.load_best_score(), 3);

        store.save_best_score(40);

        let content = store.provider.get_config_content().unwrap().unwrap();
        assert!(content.contains("playerName: neo"));
        assert!(content.contains("neonSnakeHighScore: 40"));
        assert_eq!(store.try_load(), Ok(Some(40)));
    }

    #[test]
    fn test_unparsable_file_is_not_overwritten() {
        let original = "[not, a, map";
        let mut store = YamlBestScoreStore::new(MemoryContentProvider::with_content(original));
        assert_eq!(store.load_best_score(), 0);

        store.save_best_score(25);

        assert!(matches!(store.try_save(25), Err(StorageError::Format(_))));
        let content = store.provider.get_config_content().unwrap().unwrap();
        assert_eq!(content, original);
        assert_eq!(store.load_best_score(), 25);
    }

    #[test]
    fn test_invalid_score_value_is_format_error() {
        let store = YamlBestScoreStore::new(MemoryContentProvider::with_content("neonSnakeHighScore: lots\n"));
        assert!(matches!(store.try_load(), Err(StorageError::Format(_))));

        let store = YamlBestScoreStore::new(MemoryContentProvider::with_content("neonSnakeHighScore: -4\n"));
        assert!(matches!(store.try_load(), Err(StorageError::Format(_))));
    }

    #[test]
    fn test_yaml_error_converts_to_format() {
        let error = serde_yaml_ng::from_str::<Mapping>("[1, 2").unwrap_err();
        assert!(matches!(StorageError::from(error), StorageError::Format(_)));
    }

    #[test]
    fn test_broken_storage_degrades_to_memory() {
        let mut store = YamlBestScoreStore::new(BrokenProvider);
        assert_eq!(store.load_best_score(), 0);
        store.save_best_score(55);
        assert_eq!(store.load_best_score(), 55);
    }

    #[test]
    fn test_corrupt_file_reports_format_error() {
        let store = YamlBestScoreStore::new(MemoryContentProvider::with_content("[not, a, map"));
        assert!(matches!(store.try_load(), Err(StorageError::Format(_))));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let file_path = get_temp_file_path();
        let mut store = YamlBestScoreStore::from_file(&file_path);
        store.save_best_score(90);

        let mut reopened = YamlBestScoreStore::from_file(&file_path);
        assert_eq!(reopened.load_best_score(), 90);
        let _ = std::fs::remove_file(&file_path);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryBestScoreStore::new(10);
        assert_eq!(store.load_best_score(), 10);
        store.save_best_score(30);
        assert_eq!(store.load_best_score(), 30);
    }
}
