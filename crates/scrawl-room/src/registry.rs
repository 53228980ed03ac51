//! Room registry: creates, finds, and tears down rooms.

use std::collections::HashMap;
use std::sync::Arc;

use scrawl_gateway::Gateway;
use scrawl_protocol::{PlayerId, RoomId, RoomSettings};

use crate::room::{JoinAck, RoomHandle, spawn_room};
use crate::words::WordPool;
use crate::RoomError;

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Process-wide directory of active rooms.
///
/// Owns creation (including room-code allocation), lookup, and
/// teardown. Also tracks which participant is in which room — a
/// participant is in at most one room at a time, which is what lets
/// inbound actions be routed without the caller tracking membership.
///
/// Constructed once per process and injected wherever inbound actions
/// are handled; there is no ambient global room map.
pub struct RoomRegistry<G: Gateway> {
    gateway: Arc<G>,
    pool: Arc<WordPool>,
    rooms: HashMap<RoomId, RoomHandle>,
    members: HashMap<PlayerId, RoomId>,
}

impl<G: Gateway> RoomRegistry<G> {
    pub fn new(gateway: Arc<G>, pool: Arc<WordPool>) -> Self {
        Self {
            gateway,
            pool,
            rooms: HashMap::new(),
            members: HashMap::new(),
        }
    }

    /// Creates an empty room in the lobby phase and returns its code.
    ///
    /// Settings are clamped, never rejected. The code is drawn at
    /// random and redrawn on collision — collisions are vanishingly
    /// rare in a 36^6 space but handled, not assumed away.
    pub fn create(&mut self, settings: RoomSettings) -> RoomId {
        let settings = settings.sanitized();
        let mut rng = rand::rng();
        let room_id = loop {
            let candidate = RoomId::random(&mut rng);
            if !self.rooms.contains_key(&candidate) {
                break candidate;
            }
        };

        let handle = spawn_room(
            room_id.clone(),
            settings,
            Arc::clone(&self.gateway),
            Arc::clone(&self.pool),
            DEFAULT_CHANNEL_SIZE,
        );
        self.rooms.insert(room_id.clone(), handle);
        tracing::info!(%room_id, total = self.rooms.len(), "room created");
        room_id
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&RoomHandle> {
        self.rooms.get(room_id)
    }

    /// Adds a participant to a room, enforcing one-room-at-a-time.
    pub async fn join(
        &mut self,
        player: PlayerId,
        name: String,
        room_id: &RoomId,
    ) -> Result<JoinAck, RoomError> {
        if self.members.contains_key(&player) {
            return Err(RoomError::InvalidState("already in a room".into()));
        }
        let handle = self
            .rooms
            .get(room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?;

        let ack = handle.join(player, name).await?;
        self.members.insert(player, room_id.clone());
        Ok(ack)
    }

    /// Removes a participant from their room (no-op if they are in
    /// none), tearing the room down when it empties.
    pub async fn disconnect(&mut self, player: PlayerId) -> Result<(), RoomError> {
        let Some(room_id) = self.members.remove(&player) else {
            return Ok(());
        };

        let Some(handle) = self.rooms.get(&room_id) else {
            return Ok(());
        };
        let outcome = handle.leave(player).await?;
        if outcome.now_empty {
            tracing::info!(%room_id, "last player left");
            self.delete(&room_id).await;
        }
        Ok(())
    }

    /// Shuts a room down and scrubs every index entry pointing at it.
    /// Idempotent: deleting an unknown room does nothing.
    pub async fn delete(&mut self, room_id: &RoomId) {
        let Some(handle) = self.rooms.remove(room_id) else {
            return;
        };
        // The actor may already be gone (it exits on its own when the
        // last player leaves) — a failed send is fine.
        let _ = handle.shutdown().await;
        self.members.retain(|_, rid| rid != room_id);
        tracing::info!(%room_id, total = self.rooms.len(), "room deleted");
    }

    /// The room a participant is currently in, if any.
    pub fn find_by_participant(&self, player: PlayerId) -> Option<&RoomHandle> {
        self.members.get(&player).and_then(|rid| self.rooms.get(rid))
    }

    /// The room a participant hosts, if any.
    pub async fn find_by_host(&self, player: PlayerId) -> Option<&RoomHandle> {
        let handle = self.find_by_participant(player)?;
        let info = handle.info().await.ok()?;
        (info.host == Some(player)).then_some(handle)
    }

    /// The room a participant is currently drawing in, if any.
    pub async fn find_by_drawer(&self, player: PlayerId) -> Option<&RoomHandle> {
        let handle = self.find_by_participant(player)?;
        let info = handle.info().await.ok()?;
        (info.drawer == Some(player)).then_some(handle)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
