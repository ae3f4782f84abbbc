//! Chat client - reacts to socket frames and page events.
//!
//! Every handler is a small parse → validate → effect step. Handlers never
//! return errors: a bad frame is logged and dropped so the next event is
//! processed normally.

use crate::base::chaterror::ChatError;
use crate::base::clientstate::ClientState;
use crate::chat::config::ChatConfig;
use crate::chat::message::{ChatLine, ChatMessage};
use crate::page::{ChatLog, KeyEvent, LogEntry, MessageInput, RoomId, UserIdentity};
use crate::ws::{CloseFrame, Message};
use tokio::sync::mpsc;

/// Queue of frames waiting to be written to the socket.
pub type Outbound = mpsc::UnboundedSender<Message>;

/// One chat client bound to one room socket.
pub struct ChatClient<I, L> {
    room: RoomId,
    identity: UserIdentity,
    input: I,
    log: L,
    outbound: Outbound,
    state: ClientState,
}

impl<I: MessageInput, L: ChatLog> ChatClient<I, L> {
    /// Create a connected client.
    pub fn new(room: RoomId, identity: UserIdentity, input: I, log: L, outbound: Outbound) -> Self {
        Self {
            room,
            identity,
            input,
            log,
            outbound,
            state: ClientState::Connected,
        }
    }

    pub fn from_config(config: &ChatConfig, input: I, log: L, outbound: Outbound) -> Self {
        Self::new(
            config.room.clone(),
            config.identity.clone(),
            input,
            log,
            outbound,
        )
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Handle one frame from the socket.
    pub fn receive(&mut self, msg: Message) {
        if self.state.is_closed() {
            tracing::debug!(room = %self.room, "dropping frame on closed client");
            return;
        }

        match msg {
            Message::Text(payload) => {
                if let Err(e) = self.receive_text(&payload) {
                    tracing::warn!(room = %self.room, error = %e, "dropping inbound frame");
                }
            }
            Message::Binary(data) => {
                let e = ChatError::UnexpectedBinaryFrame(data.len());
                tracing::warn!(room = %self.room, error = %e, "dropping inbound frame");
            }
            Message::Close(frame) => self.on_close(frame),
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    /// Parse a text frame and render it. Returns whether a line was added.
    fn receive_text(&mut self, payload: &str) -> Result<bool, ChatError> {
        let Some(line) = ChatLine::parse(payload)? else {
            tracing::debug!(room = %self.room, "frame without username/message ignored");
            return Ok(false);
        };

        self.log.append(LogEntry::new(line.to_string()));
        self.log.scroll_to_bottom();
        Ok(true)
    }

    /// Send the typed message, if any, and clear the field.
    pub fn send_message(&mut self) {
        let raw = self.input.value();
        let text = raw.trim();
        if text.is_empty() {
            return;
        }
        if self.state.is_closed() {
            tracing::debug!(room = %self.room, "not sending on closed client");
            return;
        }

        match ChatMessage::new(&self.identity, text).to_frame() {
            Ok(frame) => {
                if self.outbound.send(Message::Text(frame)).is_err() {
                    tracing::debug!(room = %self.room, "outbound queue gone, frame dropped");
                }
            }
            Err(e) => {
                tracing::warn!(room = %self.room, error = %e, "failed to encode message");
                return;
            }
        }

        self.input.set_value("");
    }

    /// Handle a key press in the message field.
    pub fn handle_key(&mut self, event: &mut KeyEvent) {
        if event.is_commit() {
            event.prevent_default();
            self.send_message();
        }
    }

    /// The socket closed. The client stays inert from here on.
    pub fn on_close(&mut self, frame: Option<CloseFrame>) {
        if self.state.is_closed() {
            return;
        }
        match &frame {
            Some(f) => tracing::error!(
                room = %self.room,
                close = %f,
                clean = f.code.is_clean(),
                "WebSocket closed unexpectedly"
            ),
            None => tracing::error!(room = %self.room, "WebSocket closed unexpectedly"),
        }
        self.state = ClientState::Closed;
    }

    /// Give back the page bindings.
    pub fn into_parts(self) -> (I, L) {
        (self.input, self.log)
    }
}
