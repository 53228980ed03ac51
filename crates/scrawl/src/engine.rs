//! Inbound action dispatch.

use std::sync::Arc;

use scrawl_gateway::Gateway;
use scrawl_protocol::{ClientAction, PlayerId, RoomId, ServerEvent};
use scrawl_room::{RoomError, RoomRegistry, WordPool};
use tokio::sync::Mutex;

/// Routes participant actions into the room registry.
///
/// One engine per process. The registry sits behind a mutex — lookups
/// and membership changes are brief; everything stateful happens inside
/// the per-room actors, so rooms never block each other on game logic.
pub struct Engine<G: Gateway> {
    gateway: Arc<G>,
    registry: Mutex<RoomRegistry<G>>,
}

impl<G: Gateway> Engine<G> {
    pub fn new(gateway: Arc<G>, pool: WordPool) -> Self {
        let registry = RoomRegistry::new(Arc::clone(&gateway), Arc::new(pool));
        Self {
            gateway,
            registry: Mutex::new(registry),
        }
    }

    /// Handles one inbound action from `caller`.
    ///
    /// Never returns an error: rejected actions turn into a single
    /// error event to the caller and leave all state unchanged.
    pub async fn handle(&self, caller: PlayerId, action: ClientAction) {
        match action {
            ClientAction::CreateRoom { player_name, settings } => {
                let mut registry = self.registry.lock().await;
                let room_id = registry.create(settings);
                match registry.join(caller, player_name, &room_id).await {
                    Ok(ack) => {
                        self.gateway.send_to_player(
                            caller,
                            ServerEvent::RoomCreated { room_id, is_host: ack.is_host },
                        );
                    }
                    Err(err) => {
                        // Creator could not enter (already in a room) —
                        // don't leave an unreachable empty room behind.
                        registry.delete(&room_id).await;
                        self.reject(caller, err);
                    }
                }
            }

            ClientAction::JoinRoom { room_id, player_name } => {
                let Some(room_id) = RoomId::parse(&room_id) else {
                    self.reject_reason(caller, format!("room {room_id} not found"));
                    return;
                };
                let mut registry = self.registry.lock().await;
                match registry.join(caller, player_name, &room_id).await {
                    Ok(ack) => {
                        self.gateway.send_to_player(
                            caller,
                            ServerEvent::RoomJoined { room_id, is_host: ack.is_host },
                        );
                    }
                    Err(err) => self.reject(caller, err),
                }
            }

            ClientAction::StartGame => {
                let registry = self.registry.lock().await;
                match registry.find_by_host(caller).await {
                    Some(handle) => {
                        let _ = handle.start(caller).await;
                    }
                    None => self.reject_not_host(&registry, caller),
                }
            }

            ClientAction::PlayAgain => {
                let registry = self.registry.lock().await;
                match registry.find_by_host(caller).await {
                    Some(handle) => {
                        let _ = handle.play_again(caller).await;
                    }
                    None => self.reject_not_host(&registry, caller),
                }
            }

            ClientAction::SelectWord { word } => {
                let registry = self.registry.lock().await;
                match registry.find_by_drawer(caller).await {
                    Some(handle) => {
                        let _ = handle.select_word(caller, word).await;
                    }
                    None => self.reject_not_drawer(&registry, caller),
                }
            }

            ClientAction::Draw { stroke } => {
                let registry = self.registry.lock().await;
                match registry.find_by_drawer(caller).await {
                    Some(handle) => {
                        let _ = handle.draw(caller, stroke).await;
                    }
                    None => self.reject_not_drawer(&registry, caller),
                }
            }

            ClientAction::Chat { text } => {
                let registry = self.registry.lock().await;
                match registry.find_by_participant(caller) {
                    Some(handle) => {
                        let _ = handle.chat(caller, text).await;
                    }
                    None => self.reject(
                        caller,
                        RoomError::InvalidState("you are not in a room".into()),
                    ),
                }
            }

            ClientAction::Disconnect => {
                let mut registry = self.registry.lock().await;
                if let Err(err) = registry.disconnect(caller).await {
                    tracing::debug!(player = %caller, error = %err, "disconnect cleanup failed");
                }
            }
        }
    }

    /// Number of rooms currently alive (health reporting).
    pub async fn room_count(&self) -> usize {
        self.registry.lock().await.room_count()
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    fn reject(&self, caller: PlayerId, err: RoomError) {
        tracing::debug!(player = %caller, error = %err, "action rejected");
        self.gateway
            .send_to_player(caller, ServerEvent::Error { reason: err.to_string() });
    }

    fn reject_reason(&self, caller: PlayerId, reason: String) {
        tracing::debug!(player = %caller, %reason, "action rejected");
        self.gateway.send_to_player(caller, ServerEvent::Error { reason });
    }

    /// Host-only action from someone who isn't hosting anything:
    /// distinguish "not the host" from "not even in a room".
    fn reject_not_host(&self, registry: &RoomRegistry<G>, caller: PlayerId) {
        let err = if registry.find_by_participant(caller).is_some() {
            RoomError::NotHost
        } else {
            RoomError::InvalidState("you are not in a room".into())
        };
        self.reject(caller, err);
    }

    fn reject_not_drawer(&self, registry: &RoomRegistry<G>, caller: PlayerId) {
        let err = if registry.find_by_participant(caller).is_some() {
            RoomError::NotCurrentDrawer
        } else {
            RoomError::InvalidState("you are not in a room".into())
        };
        self.reject(caller, err);
    }
}
