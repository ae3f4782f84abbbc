//! Room relay server.
//!
//! A small WebSocket server for the chat wire protocol: every connection
//! to `/ws/chat/{room}/` joins that room's group, and each chat frame it
//! sends is broadcast to the whole group, sender included.
//!
//! # Example
//! ```rust,ignore
//! use roomchat::relay::RoomRelay;
//!
//! let relay = RoomRelay::bind("127.0.0.1:8000").await?;
//! println!("relay on {}", relay.local_addr()?);
//! relay.serve().await;
//! ```

pub mod groups;

pub use groups::{MemberId, RoomGroups};

use crate::base::chaterror::ChatError;
use crate::base::context::IoResultExt;
use crate::page::RoomId;
use crate::ws::Message;
use futures::{SinkExt, StreamExt};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;

/// What the relay expects from a client.
#[derive(Debug, Deserialize)]
struct RelayInbound {
    message: String,
    username: String,
}

/// What the relay broadcasts to the room.
#[derive(Debug, Serialize)]
struct RelayOutbound<'a> {
    message: &'a str,
    username: &'a str,
}

/// Extract the room from a socket path: `/ws/chat/{room}/`, trailing
/// slash optional.
pub fn room_from_path(path: &str) -> Option<RoomId> {
    let rest = path.strip_prefix("/ws/chat/")?;
    let segment = rest.strip_suffix('/').unwrap_or(rest);
    if segment.contains('/') {
        return None;
    }
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    RoomId::new(decoded.into_owned()).ok()
}

/// Relay server accepting room sockets.
pub struct RoomRelay {
    listener: TcpListener,
    groups: Arc<RoomGroups>,
}

impl RoomRelay {
    /// Bind the relay to an address.
    pub async fn bind<A: ToSocketAddrs + fmt::Display>(addr: A) -> Result<Self, ChatError> {
        let label = addr.to_string();
        let listener = TcpListener::bind(addr).await.bind_context(label)?;
        Ok(Self {
            listener,
            groups: Arc::new(RoomGroups::new()),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ChatError> {
        self.listener
            .local_addr()
            .map_err(|_| ChatError::ConnectionFailed)
    }

    /// Shared view of the room groups.
    pub fn groups(&self) -> Arc<RoomGroups> {
        self.groups.clone()
    }

    /// Accept connections until the listener fails.
    pub async fn serve(self) {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::error!(error = %e, "relay accept failed");
                    return;
                }
            };
            let groups = self.groups.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, peer, groups).await {
                    tracing::debug!(%peer, error = %e, "relay connection ended");
                }
            });
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    groups: Arc<RoomGroups>,
) -> Result<(), ChatError> {
    let mut room = None;
    let callback = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
        match room_from_path(req.uri().path()) {
            Some(r) => {
                room = Some(r);
                Ok(resp)
            }
            None => {
                let mut err = ErrorResponse::new(Some("unknown chat room path".to_string()));
                *err.status_mut() = StatusCode::NOT_FOUND;
                Err(err)
            }
        }
    };

    let ws_stream = tokio_tungstenite::accept_hdr_async(stream, callback)
        .await
        .map_err(|e| {
            tracing::debug!(%peer, "relay handshake failed: {:?}", e);
            ChatError::WsProtocolError
        })?;
    let room = room.ok_or(ChatError::WsProtocolError)?;

    let (mut sink, mut source) = ws_stream.split();
    let (member, mut inbox) = groups.join(&room);
    tracing::info!(%peer, room = %room, member, "relay member joined");

    let writer = tokio::spawn(async move {
        while let Some(msg) = inbox.recv().await {
            if sink.send(msg.into()).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = source.next().await {
        let frame = match frame {
            Ok(frame) => Message::from(frame),
            Err(e) => {
                tracing::debug!(%peer, "relay read failed: {:?}", e);
                break;
            }
        };
        match frame {
            Message::Text(payload) => relay_text(&groups, &room, &payload),
            Message::Close(_) => break,
            _ => {}
        }
    }

    groups.leave(&room, member);
    writer.abort();
    tracing::info!(%peer, room = %room, member, "relay member left");
    Ok(())
}

fn relay_text(groups: &RoomGroups, room: &RoomId, payload: &str) {
    let inbound: RelayInbound = match serde_json::from_str(payload) {
        Ok(inbound) => inbound,
        Err(e) => {
            tracing::warn!(room = %room, error = %e, "relay dropping malformed frame");
            return;
        }
    };
    let outbound = RelayOutbound {
        message: &inbound.message,
        username: &inbound.username,
    };
    match serde_json::to_string(&outbound) {
        Ok(text) => {
            let delivered = groups.broadcast(room, &Message::Text(text));
            tracing::debug!(room = %room, delivered, "relay broadcast");
        }
        Err(e) => tracing::warn!(room = %room, error = %e, "relay failed to encode frame"),
    }
}
