//! Client side of the room socket, over tokio-tungstenite.
//!
//! The socket is split into a writer and a reader half, each behind its
//! own async mutex, so a pending read never blocks a send.

use super::message::{CloseCode, CloseFrame, Message};
use crate::base::chaterror::ChatError;
use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use http::header::{HeaderName, HeaderValue, SEC_WEBSOCKET_PROTOCOL};
use http::HeaderMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode as WireCloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame as WireCloseFrame;
use tokio_tungstenite::{connect_async, tungstenite, MaybeTlsStream, WebSocketStream};
use url::Url;

type Transport = WebSocketStream<MaybeTlsStream<TcpStream>>;
type Writer = SplitSink<Transport, tungstenite::Message>;
type Reader = SplitStream<Transport>;

/// An open room socket.
pub struct WebSocket {
    writer: Arc<Mutex<Writer>>,
    reader: Arc<Mutex<Reader>>,
    url: Url,
}

impl WebSocket {
    /// Open a socket with no extra handshake headers.
    ///
    /// # Example
    /// ```ignore
    /// let ws = WebSocket::connect("ws://localhost:8000/ws/chat/1/").await?;
    /// ```
    pub async fn connect(url: &str) -> Result<Self, ChatError> {
        WebSocketBuilder::new().url(url)?.connect().await
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Write one frame and flush it.
    pub async fn send(&self, msg: Message) -> Result<(), ChatError> {
        let mut writer = self.writer.lock().await;
        writer.send(msg.into()).await.map_err(|e| {
            tracing::debug!(url = %self.url, "WebSocket send error: {:?}", e);
            ChatError::ConnectionClosed
        })
    }

    /// Wait for the next frame. `None` once the peer is gone.
    ///
    /// Cancel safe: dropping the future loses no frame.
    pub async fn recv(&self) -> Result<Option<Message>, ChatError> {
        let mut reader = self.reader.lock().await;
        let Some(next) = reader.next().await else {
            return Ok(None);
        };
        next.map(|frame| Some(Message::from(frame))).map_err(|e| {
            tracing::debug!(url = %self.url, "WebSocket read error: {:?}", e);
            match e {
                tungstenite::Error::Protocol(_) => ChatError::WsProtocolError,
                _ => ChatError::ConnectionClosed,
            }
        })
    }

    /// Start the closing handshake.
    pub async fn close(&self, frame: Option<CloseFrame>) -> Result<(), ChatError> {
        self.send(Message::Close(frame)).await
    }

    /// Close the connection the way a browser does on page unload.
    pub async fn going_away(&self) -> Result<(), ChatError> {
        self.close(Some(CloseFrame::new(CloseCode::GOING_AWAY, "")))
            .await
    }
}

/// Handshake options for a [`WebSocket`].
#[derive(Debug, Clone, Default)]
pub struct WebSocketBuilder {
    target: Option<Url>,
    extra_headers: HeaderMap,
    protocols: Vec<String>,
    handshake_timeout: Option<Duration>,
}

impl WebSocketBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the socket URL. Only `ws` and `wss` are accepted.
    pub fn url(self, url: &str) -> Result<Self, ChatError> {
        let parsed = Url::parse(url).map_err(|_| ChatError::InvalidUrl)?;
        self.parsed_url(parsed)
    }

    /// Set an already parsed URL.
    pub fn parsed_url(mut self, url: Url) -> Result<Self, ChatError> {
        match url.scheme() {
            "ws" | "wss" => {
                self.target = Some(url);
                Ok(self)
            }
            _ => Err(ChatError::DisallowedUrlScheme),
        }
    }

    /// Add a header to the handshake request.
    ///
    /// Names or values that are not valid HTTP are skipped.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                self.extra_headers.insert(name, value);
            }
            _ => tracing::debug!(name, "skipping invalid handshake header"),
        }
        self
    }

    pub fn headers(mut self, headers: &HeaderMap) -> Self {
        self.extra_headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Offer a subprotocol in `Sec-WebSocket-Protocol`.
    pub fn subprotocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocols.push(protocol.into());
        self
    }

    /// Give up on the handshake after `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = Some(timeout);
        self
    }

    pub fn socket_url(&self) -> Option<&Url> {
        self.target.as_ref()
    }

    pub fn handshake_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    /// Whether the socket will run over TLS.
    pub fn is_secure(&self) -> bool {
        matches!(self.target.as_ref().map(Url::scheme), Some("wss"))
    }

    fn request(&self, url: &Url) -> Result<Request, ChatError> {
        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|_| ChatError::InvalidUrl)?;
        let headers = request.headers_mut();
        for (name, value) in &self.extra_headers {
            headers.insert(name, value.clone());
        }
        if !self.protocols.is_empty() {
            let offered = HeaderValue::try_from(self.protocols.join(", "))
                .map_err(|_| ChatError::InvalidUrl)?;
            headers.insert(SEC_WEBSOCKET_PROTOCOL, offered);
        }
        Ok(request)
    }

    /// Perform the opening handshake.
    pub async fn connect(self) -> Result<WebSocket, ChatError> {
        let url = self.target.clone().ok_or(ChatError::InvalidUrl)?;
        let request = self.request(&url)?;

        let attempt = match self.handshake_timeout {
            Some(limit) => tokio::time::timeout(limit, connect_async(request))
                .await
                .map_err(|_| ChatError::ConnectionTimedOut)?,
            None => connect_async(request).await,
        };
        let (transport, response) = attempt.map_err(|e| {
            tracing::debug!(url = %url, "WebSocket handshake failed: {:?}", e);
            ChatError::ConnectionFailed
        })?;
        tracing::debug!(url = %url, status = %response.status(), "WebSocket connected");

        let (writer, reader) = transport.split();
        Ok(WebSocket {
            writer: Arc::new(Mutex::new(writer)),
            reader: Arc::new(Mutex::new(reader)),
            url,
        })
    }
}

impl From<Message> for tungstenite::Message {
    fn from(msg: Message) -> Self {
        match msg {
            Message::Text(text) => Self::Text(text),
            Message::Binary(data) => Self::Binary(data.into()),
            Message::Ping(data) => Self::Ping(data),
            Message::Pong(data) => Self::Pong(data),
            Message::Close(frame) => Self::Close(frame.map(|f| WireCloseFrame {
                code: WireCloseCode::from(u16::from(f.code)),
                reason: f.reason.into(),
            })),
        }
    }
}

/// Raw frames never surface from a reader; they map to an empty binary frame.
impl From<tungstenite::Message> for Message {
    fn from(msg: tungstenite::Message) -> Self {
        match msg {
            tungstenite::Message::Text(text) => Self::Text(text),
            tungstenite::Message::Binary(data) => Self::Binary(Bytes::from(data)),
            tungstenite::Message::Ping(data) => Self::Ping(data),
            tungstenite::Message::Pong(data) => Self::Pong(data),
            tungstenite::Message::Close(frame) => Self::Close(frame.map(|f| {
                CloseFrame::new(CloseCode::from(u16::from(f.code)), f.reason.into_owned())
            })),
            tungstenite::Message::Frame(_) => Self::Binary(Bytes::new()),
        }
    }
}
