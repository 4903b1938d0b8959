//! Socket.IO transport for the realtime comment feed.
//!
//! Each socket gets a [`RoomHub`] connection; events queued for that
//! connection are forwarded to the socket as they arrive.

use axum::{Router, routing::get};
use serde_json::Value;
use socketioxide::{
    SocketIo,
    extract::{Data, SocketRef},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use inkwell_core::ports::blog_room;
use inkwell_infra::{ConnectionId, RoomHub};

/// Accept `5` as well as `"5"` for the blog id argument.
fn blog_id_from(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        Value::Array(items) => items.first().and_then(blog_id_from),
        _ => None,
    }
}

fn on_room_event<F, Fut>(socket: &SocketRef, event: &'static str, hub: RoomHub, conn: ConnectionId, action: F)
where
    F: Fn(RoomHub, ConnectionId, String) -> Fut + Clone + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    socket.on(event, move |socket: SocketRef, Data::<Value>(value)| {
        let hub = hub.clone();
        let action = action.clone();
        async move {
            match blog_id_from(&value) {
                Some(blog_id) => {
                    tracing::debug!(socket_id = %socket.id, blog_id, event, "Room event");
                    action(hub, conn, blog_room(blog_id)).await;
                }
                None => {
                    tracing::warn!(socket_id = %socket.id, event, payload = %value, "Invalid blog id");
                }
            }
        }
    });
}

/// Register the namespace handlers on `io`.
pub fn configure_socket_handlers(io: &SocketIo, hub: RoomHub) {
    io.ns("/", move |socket: SocketRef| {
        let hub = hub.clone();
        async move {
            let (conn, mut outbound) = hub.connect().await;
            tracing::info!(socket_id = %socket.id, connection = %conn, "Client connected");

            let forward = socket.clone();
            tokio::spawn(async move {
                while let Some(event) = outbound.recv().await {
                    let payload = match event.payload() {
                        Ok(payload) => payload,
                        Err(e) => {
                            tracing::warn!(error = %e, "Dropping unencodable event");
                            continue;
                        }
                    };
                    if let Err(e) = forward.emit(event.name(), &payload) {
                        tracing::debug!(socket_id = %forward.id, error = %e, "Emit failed");
                    }
                }
            });

            on_room_event(&socket, "join-blog", hub.clone(), conn, |hub, conn, room| async move {
                hub.join(conn, &room).await;
            });
            on_room_event(&socket, "leave-blog", hub.clone(), conn, |hub, conn, room| async move {
                hub.leave(conn, &room).await;
            });

            socket.on_disconnect(move |socket: SocketRef| {
                let hub = hub.clone();
                async move {
                    hub.disconnect(conn).await;
                    tracing::info!(socket_id = %socket.id, connection = %conn, "Client disconnected");
                }
            });
        }
    });
}

/// Serve Socket.IO on its own listener until the process exits.
pub async fn serve(host: &str, port: u16, hub: RoomHub) -> std::io::Result<()> {
    let (layer, io) = SocketIo::new_layer();
    configure_socket_handlers(&io, hub);

    let app = Router::new()
        .route("/", get(|| async { "inkwell realtime" }))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(layer),
        );

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "Socket.IO listening");
    axum::serve(listener, app).await
}
