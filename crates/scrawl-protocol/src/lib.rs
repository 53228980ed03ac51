//! Event contracts for Scrawl.
//!
//! This crate defines everything that crosses the boundary between the
//! session engine and its collaborators:
//!
//! - **Identity** ([`PlayerId`], [`RoomId`]) — who and where.
//! - **Settings** ([`RoomSettings`]) — per-room configuration with
//!   range clamping.
//! - **Actions** ([`ClientAction`]) — what participants ask the engine
//!   to do.
//! - **Events** ([`ServerEvent`]) — what the engine tells participants.
//!
//! The engine itself lives in `scrawl-room`; transport and rendering are
//! external collaborators that only ever see these types.

mod actions;
mod events;
mod ids;
mod phase;
mod settings;
mod stroke;

pub use actions::ClientAction;
pub use events::{PlayerInfo, RevealedLetter, ScoreEntry, ServerEvent};
pub use ids::{PlayerId, RoomId, ROOM_ID_LEN};
pub use phase::GamePhase;
pub use settings::RoomSettings;
pub use stroke::{Stroke, StrokeKind};
