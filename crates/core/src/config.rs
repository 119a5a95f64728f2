//! Engine configuration - grid dimensions, validated once at construction.

use thiserror::Error;

use crate::types::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, MAX_GRID_SIDE, MIN_GRID_SIDE};

/// Errors raised while setting up a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid width {width} is below the minimum of {min} columns")]
    GridTooNarrow { width: u16, min: u16 },
    #[error("grid height {height} is below the minimum of {min} rows")]
    GridTooShort { height: u16, min: u16 },
    #[error("grid {width}x{height} exceeds the maximum side of {max} cells")]
    GridTooLarge { width: u16, height: u16, max: u16 },
    #[error("starting piece overlaps a wall, the floor, or a locked cell")]
    PieceCollides,
}

/// Fixed parameters of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    width: u16,
    height: u16,
}

impl EngineConfig {
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooNarrow {
                width,
                min: MIN_GRID_SIDE,
            });
        }
        if height < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooShort {
                height,
                min: MIN_GRID_SIDE,
            });
        }
        if width > MAX_GRID_SIDE || height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                max: MAX_GRID_SIDE,
            });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}
