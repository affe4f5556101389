use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::FieldSize;

pub const MIN_GRID_CELLS: u32 = 8;
pub const MAX_GRID_CELLS: u32 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub canvas_width_px: u32,
    pub canvas_height_px: u32,
    pub cell_size_px: u32,
    pub base_tick_interval_ms: u64,
    pub power_up_duration_ms: u64,
    pub power_up_spawn_chance: f64,
    pub obstacle_period_ms: u64,
    pub initial_obstacle_count: u32,
    pub obstacle_head_clearance: i32,
    pub food_reward: u32,
    pub power_up_reward: u32,
    pub spawn_attempts: u32,
    pub initial_snake_length: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            canvas_width_px: 400,
            canvas_height_px: 400,
            cell_size_px: 20,
            base_tick_interval_ms: 150,
            power_up_duration_ms: 5000,
            power_up_spawn_chance: 0.1,
            obstacle_period_ms: 5000,
            initial_obstacle_count: 3,
            obstacle_head_clearance: 3,
            food_reward: 10,
            power_up_reward: 5,
            spawn_attempts: 100,
            initial_snake_length: 3,
        }
    }
}

impl GameSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize::from_pixels(self.canvas_width_px, self.canvas_height_px, self.cell_size_px)
    }

    pub fn base_tick_interval(&self) -> Duration {
        Duration::from_millis(self.base_tick_interval_ms)
    }

    pub fn power_up_duration(&self) -> Duration {
        Duration::from_millis(self.power_up_duration_ms)
    }

    pub fn obstacle_period(&self) -> Duration {
        Duration::from_millis(self.obstacle_period_ms)
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.cell_size_px == 0 {
            return Err("cell_size_px must be greater than 0".to_string());
        }
        if self.canvas_width_px % self.cell_size_px != 0
            || self.canvas_height_px % self.cell_size_px != 0
        {
            return Err("canvas dimensions must be multiples of cell_size_px".to_string());
        }
        let field_size = self.field_size();
        if field_size.width < MIN_GRID_CELLS as i32 || field_size.height < MIN_GRID_CELLS as i32 {
            return Err(format!(
                "grid must be at least {}x{} cells",
                MIN_GRID_CELLS, MIN_GRID_CELLS
            ));
        }
        if field_size.width > MAX_GRID_CELLS as i32 || field_size.height > MAX_GRID_CELLS as i32 {
            return Err(format!(
                "grid must be at most {}x{} cells",
                MAX_GRID_CELLS, MAX_GRID_CELLS
            ));
        }
        if !(20..=2000).contains(&self.base_tick_interval_ms) {
            return Err("base_tick_interval_ms must be between 20 and 2000".to_string());
        }
        if self.power_up_duration_ms == 0 {
            return Err("power_up_duration_ms must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.power_up_spawn_chance) {
            return Err("power_up_spawn_chance must be between 0.0 and 1.0".to_string());
        }
        if self.obstacle_period_ms == 0 {
            return Err("obstacle_period_ms must be greater than 0".to_string());
        }
        if self.obstacle_head_clearance < 0 {
            return Err("obstacle_head_clearance must not be negative".to_string());
        }
        if self.spawn_attempts == 0 {
            return Err("spawn_attempts must be greater than 0".to_string());
        }
        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }
        if self.initial_snake_length as i32 > field_size.width / 2 + 1 {
            return Err("initial snake does not fit left of the board center".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSerializer, YamlConfigSerializer};

    #[test]
    fn test_default_settings_are_valid() {
        let settings = GameSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.field_size(), FieldSize::new(20, 20));
        assert_eq!(settings.base_tick_interval(), Duration::from_millis(150));
    }

    #[test]
    fn test_uneven_canvas_is_rejected() {
        let settings = GameSettings {
            canvas_width_px: 410,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_tiny_grid_is_rejected() {
        let settings = GameSettings {
            canvas_width_px: 100,
            canvas_height_px: 100,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let settings = GameSettings {
            canvas_width_px: 20 * (MAX_GRID_CELLS + 1),
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = GameSettings {
            canvas_width_px: 20 * MAX_GRID_CELLS,
            ..GameSettings::default()
        };
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_spawn_chance_out_of_range_is_rejected() {
        let settings = GameSettings {
            power_up_spawn_chance: 1.5,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let serializer = YamlConfigSerializer::new();
        let settings: GameSettings = serializer
            .deserialize("base_tick_interval_ms: 100\nfood_reward: 20\n")
            .unwrap();
        assert_eq!(settings.base_tick_interval_ms, 100);
        assert_eq!(settings.food_reward, 20);
        assert_eq!(settings.power_up_reward, 5);
        assert_eq!(settings.canvas_width_px, 400);
    }
}
