//! Type definitions for item-quiz

use serde::{Deserialize, Serialize};

/// Time-limit bounds exposed to the presentation layer (slider range)
pub mod limits {
    /// Shortest selectable round duration in ms
    pub const MIN_TIME_LIMIT_MS: u64 = 5000;
    /// Longest selectable round duration in ms
    pub const MAX_TIME_LIMIT_MS: u64 = 60000;
}

/// Gold cost block of a catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemGold {
    pub base: u32,
    pub total: u32,
    pub sell: u32,
    pub purchasable: bool,
}

/// Image reference of a catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemImage {
    /// File name on the CDN, e.g. "3031.png"
    pub full: String,
}

/// A guessable catalog item. Identity is `id`; never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog key. Data Dragon keys items by id, so this is filled from
    /// the map key during load rather than the entry body.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub plaintext: String,
    pub gold: ItemGold,
    pub image: ItemImage,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One concluded round, as stored in the guess history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub item_name: String,
    pub item_id: String,
    pub correct: bool,
    /// Seconds from round start to resolution
    pub time_spent: f64,
}

/// How a round concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Pending,
    Correct,
    Wrong,
    Skipped,
    TimedOut,
}

/// Round state machine status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// No target loaded yet (catalog still loading, failed, or empty)
    #[default]
    Idle,
    /// Timer running, answer hidden
    AwaitingGuess,
    /// Answer revealed, waiting for the next round
    Resolved,
}

/// Tone of the feedback message shown after a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    None,
    Success,
    Error,
}

/// Quiz configuration
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Round duration in ms (default: 15000)
    pub time_limit_ms: u64,
    /// Pause between reveal and the next round in ms (default: 2000)
    pub resolution_delay_ms: u64,
    /// Countdown granularity in ms (default: 100)
    pub tick_interval_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 15000,
            resolution_delay_ms: 2000,
            tick_interval_ms: 100,
        }
    }
}

impl QuizConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = clamp_time_limit(ms);
        self
    }

    pub fn resolution_delay_ms(mut self, ms: u64) -> Self {
        self.resolution_delay_ms = ms;
        self
    }

    pub fn tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms.max(1);
        self
    }
}

/// Clamp a requested time limit to the supported slider range
pub fn clamp_time_limit(ms: u64) -> u64 {
    ms.clamp(limits::MIN_TIME_LIMIT_MS, limits::MAX_TIME_LIMIT_MS)
}

/// Observable state for the presentation boundary
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub time_left_ms: u64,
    pub time_limit_ms: u64,
    pub message: String,
    pub message_type: MessageType,
    pub revealed: bool,
    /// Current target. The name is only meaningful to show once `revealed`.
    pub target: Option<Item>,
    pub history: Vec<GuessRecord>,
}

/// Current time in milliseconds
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
