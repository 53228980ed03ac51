//! Recording fake for tests.

use std::sync::Mutex;

use scrawl_protocol::{PlayerId, RoomId, ServerEvent};

use crate::Gateway;

/// One captured delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    ToPlayer(PlayerId, ServerEvent),
    ToRoom(RoomId, ServerEvent),
    ToRoomExcept(RoomId, PlayerId, ServerEvent),
}

/// A [`Gateway`] that delivers nothing and remembers everything.
///
/// Engine tests assert on the captured sequence instead of wiring up
/// channels; group membership calls are captured too so teardown can be
/// verified.
#[derive(Default)]
pub struct RecordingGateway {
    events: Mutex<Vec<RecordedEvent>>,
    memberships: Mutex<Vec<(RoomId, PlayerId, bool)>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything captured so far, in emission order.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Drains the capture buffer, returning what was in it.
    pub fn take_events(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    /// Events delivered to one specific participant.
    pub fn sent_to(&self, player: PlayerId) -> Vec<ServerEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|rec| match rec {
                RecordedEvent::ToPlayer(p, ev) if *p == player => Some(ev.clone()),
                _ => None,
            })
            .collect()
    }

    /// Events broadcast to a room (excluding targeted sends).
    pub fn sent_to_room(&self, room: &RoomId) -> Vec<ServerEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|rec| match rec {
                RecordedEvent::ToRoom(r, ev) if r == room => Some(ev.clone()),
                RecordedEvent::ToRoomExcept(r, _, ev) if r == room => Some(ev.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(room, player, joined)` membership changes, in order.
    pub fn memberships(&self) -> Vec<(RoomId, PlayerId, bool)> {
        self.memberships.lock().unwrap().clone()
    }
}

impl Gateway for RecordingGateway {
    fn join(&self, room: &RoomId, player: PlayerId) {
        self.memberships.lock().unwrap().push((room.clone(), player, true));
    }

    fn leave(&self, room: &RoomId, player: PlayerId) {
        self.memberships.lock().unwrap().push((room.clone(), player, false));
    }

    fn send_to_player(&self, player: PlayerId, event: ServerEvent) {
        self.events.lock().unwrap().push(RecordedEvent::ToPlayer(player, event));
    }

    fn send_to_room(&self, room: &RoomId, event: ServerEvent) {
        self.events.lock().unwrap().push(RecordedEvent::ToRoom(room.clone(), event));
    }

    fn send_to_room_except(&self, room: &RoomId, excluded: PlayerId, event: ServerEvent) {
        self.events
            .lock()
            .unwrap()
            .push(RecordedEvent::ToRoomExcept(room.clone(), excluded, event));
    }
}
