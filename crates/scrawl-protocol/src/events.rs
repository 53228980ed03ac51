//! Outbound engine events.

use serde::{Deserialize, Serialize};

use crate::{GamePhase, PlayerId, RoomId, RoomSettings, Stroke};

/// A player as shown in rosters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
}

/// One scoreboard line.
///
/// Scores travel as an ordered list (join order), not a map — JSON maps
/// would need string keys and an unstable iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: PlayerId,
    pub score: u32,
}

/// A letter position already disclosed to guessers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedLetter {
    pub index: usize,
    pub letter: char,
}

/// What the engine tells participants.
///
/// Internally tagged, like [`ClientAction`](crate::ClientAction). The
/// secret word only ever appears in `WordCandidates` (drawer-only
/// delivery) and in `TurnEnded` once the round is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// To the creator: the room exists and you are its host.
    RoomCreated { room_id: RoomId, is_host: bool },

    /// To a joiner: you are in.
    RoomJoined { room_id: RoomId, is_host: bool },

    /// To the room: current roster, host, settings, and phase.
    RoomUpdate {
        players: Vec<PlayerInfo>,
        host: PlayerId,
        settings: RoomSettings,
        phase: GamePhase,
    },

    /// To the room: the host started the game.
    GameStarted,

    /// To the room: a new turn begins. `round` is 1-based for display.
    RoundStarted {
        drawer: PlayerId,
        round: u32,
        total_rounds: u32,
    },

    /// To the drawer only: pick one of these.
    WordCandidates { words: Vec<String> },

    /// To the room: the drawer picked; here is the masked display.
    WordSelected { masked: String, length: usize },

    /// To a late joiner: everything needed to catch up mid-turn.
    GameSnapshot {
        drawer: Option<PlayerId>,
        masked_word: Option<String>,
        strokes: Vec<Stroke>,
        scores: Vec<ScoreEntry>,
        revealed: Vec<RevealedLetter>,
        round: u32,
        total_rounds: u32,
    },

    /// To everyone but the drawer: a stroke to replay.
    Draw { stroke: Stroke },

    /// To the room: a scheduled hint fired.
    LetterRevealed { index: usize, letter: char },

    /// To the room: a chat line, flagged when it was the winning guess.
    Chat {
        player: PlayerId,
        name: String,
        text: String,
        correct: bool,
    },

    /// To the room: the turn is over; the word is no longer secret.
    TurnEnded {
        word: String,
        winner: Option<PlayerId>,
        scores: Vec<ScoreEntry>,
    },

    /// To the room: all rounds played.
    GameFinished {
        scores: Vec<ScoreEntry>,
        winner: PlayerId,
    },

    /// To one participant: the action was rejected, state unchanged.
    Error { reason: String },
}
