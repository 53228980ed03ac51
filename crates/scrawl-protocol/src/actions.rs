//! Inbound participant actions.

use serde::{Deserialize, Serialize};

use crate::{RoomSettings, Stroke};

/// What a participant can ask the engine to do.
///
/// The caller's [`PlayerId`](crate::PlayerId) is not part of the
/// payload — it comes from the transport layer's connection identity,
/// so a client can never act as someone else.
///
/// Internally tagged: `{ "type": "chat", "text": "casa" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientAction {
    /// Open a new room; the caller becomes host and sole player.
    CreateRoom {
        player_name: String,
        #[serde(default)]
        settings: RoomSettings,
    },

    /// Join an existing room by its code.
    JoinRoom {
        room_id: String,
        player_name: String,
    },

    /// Start the game (host only, from the lobby).
    StartGame,

    /// Pick one of the offered word candidates (current drawer only).
    SelectWord { word: String },

    /// Add a stroke to the canvas (current drawer only).
    Draw { stroke: Stroke },

    /// Say something — every chat line is also evaluated as a guess.
    Chat { text: String },

    /// Restart a finished game with the same players (host only).
    PlayAgain,

    /// Leave; the transport layer sends this when a connection drops.
    Disconnect,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StrokeKind;

    #[test]
    fn test_create_room_defaults_settings() {
        let action: ClientAction =
            serde_json::from_str(r#"{"type": "create_room", "player_name": "Ada"}"#).unwrap();
        match action {
            ClientAction::CreateRoom { player_name, settings } => {
                assert_eq!(player_name, "Ada");
                assert_eq!(settings, RoomSettings::default());
            }
            other => panic!("expected CreateRoom, got {other:?}"),
        }
    }

    #[test]
    fn test_chat_json_shape() {
        let json = serde_json::to_value(&ClientAction::Chat { text: "hi".into() }).unwrap();
        assert_eq!(json["type"], "chat");
        assert_eq!(json["text"], "hi");
    }

    #[test]
    fn test_draw_round_trip() {
        let action = ClientAction::Draw {
            stroke: Stroke {
                x: 1.0,
                y: 2.0,
                kind: StrokeKind::End,
                color: None,
                size: None,
            },
        };
        let bytes = serde_json::to_vec(&action).unwrap();
        let decoded: ClientAction = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(action, decoded);
    }

    #[test]
    fn test_unknown_action_type_is_rejected() {
        let result: Result<ClientAction, _> =
            serde_json::from_str(r#"{"type": "fly_to_moon"}"#);
        assert!(result.is_err());
    }
}
