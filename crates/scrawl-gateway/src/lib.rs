//! Broadcast gateway for Scrawl.
//!
//! The engine never talks to sockets. It emits [`ServerEvent`]s through
//! the [`Gateway`] trait, and whatever owns the real connections —
//! websockets, a test harness, a bot loop — implements delivery.
//!
//! # Key types
//!
//! - [`Gateway`] — the capability set the engine requires: join/leave a
//!   room's delivery group, send to one participant, send to a room.
//! - [`ChannelGateway`] — delivery over per-participant tokio channels.
//! - [`RecordingGateway`] — a fake that captures every emitted event,
//!   for asserting on engine behavior in tests.

mod channel;
mod recording;

pub use channel::{ChannelGateway, EventReceiver};
pub use recording::{RecordedEvent, RecordingGateway};

use scrawl_protocol::{PlayerId, RoomId, ServerEvent};

/// Delivery capabilities the session engine requires from transport.
///
/// All methods are fire-and-forget: delivery to a participant who has
/// already vanished is silently dropped, never an error — the engine's
/// state must not depend on whether anyone is still listening.
pub trait Gateway: Send + Sync + 'static {
    /// Adds a participant to a room's delivery group.
    fn join(&self, room: &RoomId, player: PlayerId);

    /// Removes a participant from a room's delivery group.
    fn leave(&self, room: &RoomId, player: PlayerId);

    /// Delivers an event to one participant.
    fn send_to_player(&self, player: PlayerId, event: ServerEvent);

    /// Delivers an event to every member of a room's group.
    fn send_to_room(&self, room: &RoomId, event: ServerEvent);

    /// Delivers an event to every member of a room's group except one.
    ///
    /// Used for stroke relay — the drawer already has the stroke.
    fn send_to_room_except(&self, room: &RoomId, excluded: PlayerId, event: ServerEvent);
}
