//! Chat session - the event loop around one client.
//!
//! Socket frames, queued outbound frames and page events are handled on a
//! single task, one at a time, in the order they become ready.

use crate::base::chaterror::ChatError;
use crate::chat::client::ChatClient;
use crate::chat::config::ChatConfig;
use crate::page::{ChatLog, KeyEvent, MessageInput};
use crate::ws::{Message, WebSocket};
use tokio::sync::mpsc;

/// Something the page reports to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The user edited the message field; carries its new contents.
    Input(String),
    /// A key was pressed in the message field.
    KeyPress(KeyEvent),
    /// The page is going away.
    Unload,
}

/// A connected client plus its socket.
pub struct ChatSession<I, L> {
    client: ChatClient<I, L>,
    socket: WebSocket,
    outbound: mpsc::UnboundedReceiver<Message>,
}

impl<I: MessageInput, L: ChatLog> ChatSession<I, L> {
    /// Open the room socket and build the client.
    pub async fn connect(config: &ChatConfig, input: I, log: L) -> Result<Self, ChatError> {
        let socket = config.websocket()?.connect().await?;
        tracing::info!(room = %config.room, url = %socket.url(), "joined chat room");

        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            client: ChatClient::from_config(config, input, log, tx),
            socket,
            outbound: rx,
        })
    }

    pub fn client(&self) -> &ChatClient<I, L> {
        &self.client
    }

    pub fn socket(&self) -> &WebSocket {
        &self.socket
    }

    /// Drive the session until the socket closes or the page goes away.
    ///
    /// Returns the client so the host can look at its final state.
    pub async fn run(mut self, mut events: mpsc::Receiver<PageEvent>) -> ChatClient<I, L> {
        loop {
            tokio::select! {
                frame = self.socket.recv() => match frame {
                    Ok(Some(msg)) => {
                        self.client.receive(msg);
                        if self.client.state().is_closed() {
                            // Flushes the queued reply to the peer's close.
                            let _ = self.socket.close(None).await;
                            break;
                        }
                    }
                    Ok(None) => {
                        self.client.on_close(None);
                        break;
                    }
                    Err(e) if e.is_fatal() => {
                        tracing::debug!(error = %e, "socket read failed");
                        self.client.on_close(None);
                        break;
                    }
                    Err(e) => tracing::debug!(error = %e, "skipping unreadable frame"),
                },
                Some(msg) = self.outbound.recv() => {
                    // Fire-and-forget: a failed write surfaces as a closed read.
                    if let Err(e) = self.socket.send(msg).await {
                        tracing::debug!(error = %e, "socket write failed");
                    }
                }
                event = events.recv() => match event {
                    Some(PageEvent::Input(text)) => self.client.input_mut().set_value(&text),
                    Some(PageEvent::KeyPress(mut key)) => self.client.handle_key(&mut key),
                    Some(PageEvent::Unload) | None => {
                        self.unload().await;
                        break;
                    }
                },
            }
        }
        self.client
    }

    async fn unload(&mut self) {
        while let Ok(msg) = self.outbound.try_recv() {
            if self.socket.send(msg).await.is_err() {
                break;
            }
        }
        if let Err(e) = self.socket.going_away().await {
            tracing::debug!(error = %e, "close on unload failed");
        }
        tracing::info!(room = %self.client.room(), "left chat room");
    }
}
