//! Session engine for Scrawl.
//!
//! Each room runs as an isolated Tokio task (actor model) owning one
//! game's full mutable state: roster, phase machine, drawer rotation,
//! the secret word, timers, and scores. The registry is the process-wide
//! directory that creates, routes to, and tears down those actors.
//!
//! # Key types
//!
//! - [`RoomRegistry`] — creates/finds/deletes rooms, routes participants
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`WordPool`] — the injected word source, sampled without bias
//! - [`Scoreboard`] — monotonic per-game scores with deterministic ties
//! - [`RoomError`] — why an action was rejected

mod error;
mod registry;
mod room;
mod scoring;
mod words;

pub use error::RoomError;
pub use registry::RoomRegistry;
pub use room::{JoinAck, LeaveOutcome, ROUND_GRACE, RoomHandle, RoomInfo};
pub use scoring::{DRAWER_AWARD, GUESSER_AWARD, Scoreboard, is_match, normalize};
pub use words::{WordPool, masked};
