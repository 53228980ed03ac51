//! Per-room game settings.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for one room, fixed at creation.
///
/// Every field is independently range-clamped by [`sanitized`]
/// (Self::sanitized) — a room is always created with workable values,
/// never rejected over settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSettings {
    /// Maximum players allowed in the room.
    pub max_players: usize,
    /// Rounds per game (one draw-and-guess cycle each).
    pub rounds: u32,
    /// Seconds the drawer has once the word is picked.
    pub draw_time_secs: u32,
    /// Word candidates offered to the drawer each turn.
    pub word_choice_count: usize,
    /// Letter hints revealed over the course of a turn.
    pub letter_hint_count: usize,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            max_players: 6,
            rounds: 3,
            draw_time_secs: 60,
            word_choice_count: 3,
            letter_hint_count: 2,
        }
    }
}

impl RoomSettings {
    pub const MAX_PLAYERS_RANGE: (usize, usize) = (2, 8);
    pub const ROUNDS_RANGE: (u32, u32) = (1, 10);
    pub const DRAW_TIME_RANGE: (u32, u32) = (40, 90);
    pub const WORD_CHOICES_RANGE: (usize, usize) = (2, 5);
    pub const LETTER_HINTS_RANGE: (usize, usize) = (0, 5);

    /// Clamps every field into its documented range.
    ///
    /// Out-of-range values get a warning and the nearest bound, so a
    /// misbehaving client can degrade its own room but never break it.
    pub fn sanitized(mut self) -> Self {
        self.max_players = clamp_field("max_players", self.max_players, Self::MAX_PLAYERS_RANGE);
        self.rounds = clamp_field("rounds", self.rounds, Self::ROUNDS_RANGE);
        self.draw_time_secs =
            clamp_field("draw_time_secs", self.draw_time_secs, Self::DRAW_TIME_RANGE);
        self.word_choice_count = clamp_field(
            "word_choice_count",
            self.word_choice_count,
            Self::WORD_CHOICES_RANGE,
        );
        self.letter_hint_count = clamp_field(
            "letter_hint_count",
            self.letter_hint_count,
            Self::LETTER_HINTS_RANGE,
        );
        self
    }
}

fn clamp_field<T: Ord + Copy + std::fmt::Display>(name: &str, value: T, (lo, hi): (T, T)) -> T {
    let clamped = value.clamp(lo, hi);
    if clamped != value {
        warn!(field = name, %value, %clamped, "room setting out of range — clamping");
    }
    clamped
}
