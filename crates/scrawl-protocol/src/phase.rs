//! The room lifecycle state machine.

use serde::{Deserialize, Serialize};

/// The phase a room is in.
///
/// ```text
/// Lobby → Choosing ⇄ Playing → Finished
///             ↑__________________|   (play again)
/// ```
///
/// - **Lobby**: players gathering, host can start once two are present.
/// - **Choosing**: a drawer has been picked and is choosing a word.
/// - **Playing**: the word is set, the draw timer is running, guesses
///   count.
/// - **Finished**: all rounds played; host can restart.
///
/// Serialized lowercase — this travels to clients in roster updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Lobby,
    Choosing,
    Playing,
    Finished,
}

impl GamePhase {
    /// A turn is underway (a drawer is assigned).
    pub fn in_round(&self) -> bool {
        matches!(self, Self::Choosing | Self::Playing)
    }

    /// Guesses are evaluated only while the canvas is live.
    pub fn accepts_guesses(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lobby => write!(f, "lobby"),
            Self::Choosing => write!(f, "choosing"),
            Self::Playing => write!(f, "playing"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&GamePhase::Lobby).unwrap(), "\"lobby\"");
        assert_eq!(
            serde_json::to_string(&GamePhase::Choosing).unwrap(),
            "\"choosing\""
        );
    }

    #[test]
    fn test_in_round() {
        assert!(!GamePhase::Lobby.in_round());
        assert!(GamePhase::Choosing.in_round());
        assert!(GamePhase::Playing.in_round());
        assert!(!GamePhase::Finished.in_round());
    }

    #[test]
    fn test_accepts_guesses_only_while_playing() {
        assert!(GamePhase::Playing.accepts_guesses());
        assert!(!GamePhase::Choosing.accepts_guesses());
        assert!(!GamePhase::Lobby.accepts_guesses());
        assert!(!GamePhase::Finished.accepts_guesses());
    }
}
