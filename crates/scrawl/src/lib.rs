//! # Scrawl
//!
//! Session engine for a turn-based drawing-and-guessing game: one
//! participant draws an assigned word, the others race to guess it in
//! chat before the draw timer runs out.
//!
//! This meta-crate ties the layers together: [`Engine`] receives
//! `(caller, action)` pairs from whatever owns the connections, routes
//! them through the room registry, and answers through the injected
//! [`Gateway`]. Transport, rendering, and word lists all stay outside.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scrawl::{ChannelGateway, Engine, WordPool};
//!
//! let gateway = Arc::new(ChannelGateway::new());
//! let engine = Engine::new(Arc::clone(&gateway), WordPool::builtin());
//! // engine.handle(player_id, action).await for each inbound action.
//! ```

mod engine;

pub use engine::Engine;

pub use scrawl_gateway::{ChannelGateway, EventReceiver, Gateway, RecordingGateway};
pub use scrawl_protocol::{
    ClientAction, GamePhase, PlayerId, RoomId, RoomSettings, ServerEvent, Stroke, StrokeKind,
};
pub use scrawl_room::{RoomError, RoomRegistry, WordPool};
