//! Realtime room fan-out.

mod memory;

pub use memory::{ConnectionId, DEFAULT_BUFFER, RoomHub};
