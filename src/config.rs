//! Session configuration
//!
//! Board geometry, the assist-button hit area and assist timing. Defaults
//! match the classic 800x577 window layout with 57 px cells. A config file
//! is optional; embedders mostly use `SessionConfig::default()`.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Axis-aligned pixel rectangle used for widget hit testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl HitRect {
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x0 && px < self.x1 && py >= self.y0 && py < self.y1
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Edge length of one board cell in pixels.
    pub cell_size: i32,
    pub board_cols: i32,
    pub board_rows: i32,
    /// Hit area of the assist button, to the right of the board.
    pub assist_button: HitRect,
    /// How long to wait for the suggestion engine before giving up.
    pub assist_timeout_ms: u64,
    /// Render/input ticks per second; owned by the driving loop, carried
    /// here so the whole session reads one config.
    pub tick_rate: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cell_size: 57,
            board_cols: 9,
            board_rows: 10,
            assist_button: HitRect {
                x0: 720,
                y0: 0,
                x1: 780,
                y1: 60,
            },
            assist_timeout_ms: 15_000,
            tick_rate: 20,
        }
    }
}

impl SessionConfig {
    /// Load a config from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading session config {}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("parsing session config")
    }

    pub fn assist_timeout(&self) -> Duration {
        Duration::from_millis(self.assist_timeout_ms)
    }
}
