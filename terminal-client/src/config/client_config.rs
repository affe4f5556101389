use neon_snake_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use neon_snake_common::games::snake::GameSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "neon_snake_config.yaml";
const MAX_FRAMES_PER_SECOND: u32 = 240;
const MAX_FRAME_DELTA_LIMIT_MS: u64 = 5000;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

/// Uses `path` when given, otherwise the config file next to the executable.
pub fn get_config_manager(
    path: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, ClientConfig, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(&get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    pub game: GameSettings,
    pub best_score_file: String,
    pub log_file: Option<String>,
    pub frames_per_second: u32,
    /// Longest stretch of real time fed into one frame.
    pub max_frame_delta_ms: u64,
}

impl ClientConfig {
    pub fn max_frame_delta(&self) -> Duration {
        Duration::from_millis(self.max_frame_delta_ms)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if self.best_score_file.trim().is_empty() {
            return Err("best_score_file must not be empty".to_string());
        }
        if self.frames_per_second == 0 || self.frames_per_second > MAX_FRAMES_PER_SECOND {
            return Err(format!(
                "frames_per_second must be between 1 and {}",
                MAX_FRAMES_PER_SECOND
            ));
        }
        if self.max_frame_delta_ms == 0 || self.max_frame_delta_ms > MAX_FRAME_DELTA_LIMIT_MS {
            return Err(format!(
                "max_frame_delta_ms must be between 1 and {}",
                MAX_FRAME_DELTA_LIMIT_MS
            ));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            best_score_file: "neon_snake_scores.yaml".to_string(),
            log_file: None,
            frames_per_second: 60,
            max_frame_delta_ms: 250,
        }
    }
}
