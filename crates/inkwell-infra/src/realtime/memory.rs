//! In-memory room registry.
//!
//! Each connection is in at most one room at a time and owns a bounded
//! outbound queue. Works within a single process only.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, mpsc};

use inkwell_core::ports::{PublishError, RealtimeEvent, RealtimePublisher};

pub const DEFAULT_BUFFER: usize = 64;

/// Opaque handle for one live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

struct Connection {
    outbound: mpsc::Sender<RealtimeEvent>,
    room: Option<String>,
}

#[derive(Default)]
struct Registry {
    connections: HashMap<ConnectionId, Connection>,
    rooms: HashMap<String, HashSet<ConnectionId>>,
}

impl Registry {
    fn remove_from_room(&mut self, id: ConnectionId, room: &str) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(&id);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
    }
}

/// Connection and room registry shared by the socket transport and the
/// comment pipeline.
#[derive(Clone)]
pub struct RoomHub {
    registry: Arc<RwLock<Registry>>,
    next_id: Arc<AtomicU64>,
    buffer_size: usize,
}

impl RoomHub {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
            next_id: Arc::new(AtomicU64::new(1)),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Register a connection. Events for its room arrive on the returned receiver.
    pub async fn connect(&self) -> (ConnectionId, mpsc::Receiver<RealtimeEvent>) {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::channel(self.buffer_size);

        self.registry.write().await.connections.insert(
            id,
            Connection {
                outbound: tx,
                room: None,
            },
        );

        tracing::debug!(connection = %id, "Realtime connection registered");
        (id, rx)
    }

    /// Move a connection into `room`, leaving whatever room it was in.
    /// Unknown connections are ignored.
    pub async fn join(&self, id: ConnectionId, room: &str) {
        let mut registry = self.registry.write().await;

        let previous = match registry.connections.get_mut(&id) {
            Some(conn) => conn.room.replace(room.to_string()),
            None => return,
        };

        if let Some(previous) = previous.filter(|prev| prev != room) {
            registry.remove_from_room(id, &previous);
        }
        registry
            .rooms
            .entry(room.to_string())
            .or_default()
            .insert(id);

        tracing::debug!(connection = %id, room, "Joined room");
    }

    /// Leave `room`. A no-op when the connection is not a member.
    pub async fn leave(&self, id: ConnectionId, room: &str) {
        let mut registry = self.registry.write().await;

        let Some(conn) = registry.connections.get_mut(&id) else {
            return;
        };
        if conn.room.as_deref() != Some(room) {
            return;
        }
        conn.room = None;
        registry.remove_from_room(id, room);

        tracing::debug!(connection = %id, room, "Left room");
    }

    /// Forget a connection entirely.
    pub async fn disconnect(&self, id: ConnectionId) {
        let mut registry = self.registry.write().await;

        if let Some(conn) = registry.connections.remove(&id) {
            if let Some(room) = conn.room {
                registry.remove_from_room(id, &room);
            }
            tracing::debug!(connection = %id, "Realtime connection closed");
        }
    }

    /// Number of connections currently in `room`.
    pub async fn room_size(&self, room: &str) -> usize {
        self.registry
            .read()
            .await
            .rooms
            .get(room)
            .map_or(0, HashSet::len)
    }

    /// Queue `event` for every member of its room. Returns how many
    /// connections accepted it; members with a full queue miss the event.
    pub async fn broadcast(&self, event: &RealtimeEvent) -> usize {
        let room = event.room();
        let registry = self.registry.read().await;

        let Some(members) = registry.rooms.get(&room) else {
            tracing::debug!(room = %room, "No listeners for room");
            return 0;
        };

        let mut delivered = 0;
        for id in members {
            let Some(conn) = registry.connections.get(id) else {
                continue;
            };
            match conn.outbound.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(connection = %id, room = %room, "Outbound queue full, event dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::debug!(connection = %id, room = %room, "Connection already closed");
                }
            }
        }

        tracing::debug!(room = %room, event = event.name(), delivered, "Event published");
        delivered
    }
}

impl Default for RoomHub {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER)
    }
}

#[async_trait]
impl RealtimePublisher for RoomHub {
    async fn publish(&self, event: RealtimeEvent) -> Result<usize, PublishError> {
        Ok(self.broadcast(&event).await)
    }
}
