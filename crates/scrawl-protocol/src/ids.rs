//! Identity newtypes.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A unique identifier for a connected participant.
///
/// Assigned by the transport layer (one per connection) and treated as
/// opaque by the engine. Newtype over `u64` so a `PlayerId` can never be
/// confused with a `RoomId` in a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Length of a room code in characters.
pub const ROOM_ID_LEN: usize = 6;

/// Characters a room code draws from: uppercase alphanumerics.
const ROOM_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A room code: a fixed-length uppercase alphanumeric token.
///
/// Doubles as the pub/sub group key and as the join code players type
/// in, so it stays short and shouting-across-the-room friendly.
/// Uniqueness is the registry's job — [`RoomId::random`] only produces
/// a well-formed candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Draws a random well-formed room code.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let token = (0..ROOM_ID_LEN)
            .map(|_| ROOM_ID_CHARSET[rng.random_range(0..ROOM_ID_CHARSET.len())] as char)
            .collect();
        Self(token)
    }

    /// Parses a code typed by a participant. Uppercases on the way in
    /// so join codes are case-insensitive; rejects anything that is not
    /// exactly [`ROOM_ID_LEN`] alphanumerics.
    pub fn parse(input: &str) -> Option<Self> {
        let token: String = input.trim().to_ascii_uppercase();
        let well_formed = token.len() == ROOM_ID_LEN
            && token.bytes().all(|b| ROOM_ID_CHARSET.contains(&b));
        well_formed.then_some(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
