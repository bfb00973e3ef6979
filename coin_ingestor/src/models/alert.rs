use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a 24h move that crossed the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Glyph used when rendering a notification.
    pub fn glyph(self) -> &'static str {
        match self {
            Direction::Up => "📈",
            Direction::Down => "📉",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

/// A notification candidate derived from a snapshot whose 24h change breached the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub coin_name: String,
    pub symbol: String,
    pub price: f64,
    pub change_pct: f64,
    pub direction: Direction,
}
