//! Error types for the session engine.

use scrawl_protocol::RoomId;

/// Everything that can go wrong with a participant action.
///
/// All of these are recoverable-by-caller: the action is rejected, room
/// state is untouched, and the reason travels back to the originating
/// participant as a single error event. Nothing here is fatal.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RoomError {
    /// No room with that code.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The room has no free player slots.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// A host-only action from a non-host.
    #[error("only the host can do that")]
    NotHost,

    /// A drawer-only action from someone else.
    #[error("only the current drawer can do that")]
    NotCurrentDrawer,

    /// The room is in the wrong phase for this action.
    #[error("invalid state for this action: {0}")]
    InvalidState(String),

    /// The room's command channel is gone (room shutting down).
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}
