use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tick pacing for the interactive loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speed {
    Normal,
    Fast,
}

impl Speed {
    /// Time between game ticks at this speed
    pub fn tick_interval(&self) -> Duration {
        match self {
            Speed::Normal => Duration::from_millis(125),
            Speed::Fast => Duration::from_millis(70),
        }
    }

    /// The other speed, for the runtime toggle
    pub fn toggled(&self) -> Speed {
        match self {
            Speed::Normal => Speed::Fast,
            Speed::Fast => Speed::Normal,
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed::Normal
    }
}

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Whether crossing an edge teleports to the opposite side instead of ending the game
    pub wrap: bool,
    /// Starting tick speed
    pub speed: Speed,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            wrap: false,
            speed: Speed::Normal,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert!(!config.wrap);
        assert_eq!(config.speed, Speed::Normal);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
    }

    #[test]
    fn test_speed_toggle() {
        assert_eq!(Speed::Normal.toggled(), Speed::Fast);
        assert_eq!(Speed::Fast.toggled(), Speed::Normal);
        assert_eq!(Speed::Normal.toggled().toggled(), Speed::Normal);
    }

    #[test]
    fn test_fast_ticks_shorter() {
        assert!(Speed::Fast.tick_interval() < Speed::Normal.tick_interval());
    }
}
