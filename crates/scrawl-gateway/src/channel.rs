//! Channel-backed gateway.

use std::collections::HashMap;
use std::sync::Mutex;

use scrawl_protocol::{PlayerId, RoomId, ServerEvent};
use tokio::sync::mpsc;

use crate::Gateway;

/// The receiving end a connection handler (or bot) drains.
pub type EventReceiver = mpsc::UnboundedReceiver<ServerEvent>;

#[derive(Default)]
struct Directory {
    /// Per-participant outbound channels.
    senders: HashMap<PlayerId, mpsc::UnboundedSender<ServerEvent>>,
    /// Room delivery groups, in join order.
    groups: HashMap<RoomId, Vec<PlayerId>>,
}

/// A [`Gateway`] delivering events over per-participant unbounded
/// channels.
///
/// The transport layer registers each connection once and pipes the
/// returned receiver to the wire however it likes; the engine side only
/// ever sees the trait.
#[derive(Default)]
pub struct ChannelGateway {
    inner: Mutex<Directory>,
}

impl ChannelGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a participant and returns the stream of their events.
    ///
    /// Re-registering the same id replaces the old channel — the stale
    /// receiver just stops getting events.
    pub fn register(&self, player: PlayerId) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.lock().unwrap().senders.insert(player, tx);
        rx
    }

    /// Drops a participant's channel and group memberships.
    pub fn unregister(&self, player: PlayerId) {
        let mut inner = self.inner.lock().unwrap();
        inner.senders.remove(&player);
        for members in inner.groups.values_mut() {
            members.retain(|p| *p != player);
        }
    }

    fn send(inner: &Directory, player: PlayerId, event: ServerEvent) {
        if let Some(tx) = inner.senders.get(&player) {
            // Receiver gone means the connection died mid-delivery.
            let _ = tx.send(event);
        }
    }
}

impl Gateway for ChannelGateway {
    fn join(&self, room: &RoomId, player: PlayerId) {
        let mut inner = self.inner.lock().unwrap();
        let members = inner.groups.entry(room.clone()).or_default();
        if !members.contains(&player) {
            members.push(player);
        }
    }

    fn leave(&self, room: &RoomId, player: PlayerId) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(members) = inner.groups.get_mut(room) {
            members.retain(|p| *p != player);
            if members.is_empty() {
                inner.groups.remove(room);
            }
        }
    }

    fn send_to_player(&self, player: PlayerId, event: ServerEvent) {
        let inner = self.inner.lock().unwrap();
        Self::send(&inner, player, event);
    }

    fn send_to_room(&self, room: &RoomId, event: ServerEvent) {
        let inner = self.inner.lock().unwrap();
        if let Some(members) = inner.groups.get(room) {
            for player in members {
                Self::send(&inner, *player, event.clone());
            }
        }
    }

    fn send_to_room_except(&self, room: &RoomId, excluded: PlayerId, event: ServerEvent) {
        let inner = self.inner.lock().unwrap();
        if let Some(members) = inner.groups.get(room) {
            for player in members {
                if *player != excluded {
                    Self::send(&inner, *player, event.clone());
                }
            }
        }
    }
}
