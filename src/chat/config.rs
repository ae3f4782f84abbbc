//! Chat configuration - everything a client needs before it connects.
//!
//! Replaces the page-global values a chat script would read at load time
//! with one explicit value handed to the session.

use crate::base::chaterror::ChatError;
use crate::page::{ChatBoxDataset, PageLocation, RoomId, UserIdentity};
use crate::ws::WebSocketBuilder;
use cookie::Cookie;
use http::header::{HeaderName, HeaderValue, COOKIE, ORIGIN};
use std::time::Duration;
use url::Url;

/// Name of the session cookie sent with the handshake.
pub const SESSION_COOKIE_NAME: &str = "sessionid";

/// Configuration for one chat client.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Page the chat is embedded in.
    pub location: PageLocation,

    /// Room to join.
    pub room: RoomId,

    /// The signed-in user.
    pub identity: UserIdentity,

    /// Extra handshake headers.
    pub headers: http::HeaderMap,

    /// Subprotocols offered in the handshake.
    pub subprotocols: Vec<String>,

    /// Session cookie value, sent as `sessionid`.
    pub session_cookie: Option<String>,

    /// Handshake timeout (None waits as long as the transport does).
    pub connect_timeout: Option<Duration>,
}

impl ChatConfig {
    pub fn builder() -> ChatConfigBuilder {
        ChatConfigBuilder::default()
    }

    /// Socket URL for this room on the page's host.
    pub fn socket_url(&self) -> Result<Url, ChatError> {
        self.location.chat_socket_url(&self.room)
    }

    /// Prepare the handshake the way the browser would send it.
    pub fn websocket(&self) -> Result<WebSocketBuilder, ChatError> {
        let mut builder = WebSocketBuilder::new()
            .parsed_url(self.socket_url()?)?
            .header(ORIGIN.as_str(), &self.location.origin())
            .headers(&self.headers);

        if let Some(session) = &self.session_cookie {
            let cookie = Cookie::new(SESSION_COOKIE_NAME, session.as_str());
            builder = builder.header(COOKIE.as_str(), &cookie.encoded().to_string());
        }
        for protocol in &self.subprotocols {
            builder = builder.subprotocol(protocol.clone());
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder)
    }
}

/// Builder for [`ChatConfig`].
#[derive(Debug, Default)]
pub struct ChatConfigBuilder {
    location: Option<PageLocation>,
    chat_box: Option<ChatBoxDataset>,
    headers: http::HeaderMap,
    subprotocols: Vec<String>,
    session_cookie: Option<String>,
    connect_timeout: Option<Duration>,
}

impl ChatConfigBuilder {
    /// Set the page URL.
    pub fn page_url(mut self, url: &str) -> Result<Self, ChatError> {
        self.location = Some(PageLocation::parse(url)?);
        Ok(self)
    }

    /// Set an already parsed page location.
    pub fn location(mut self, location: PageLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Set room and user from the chat box dataset.
    pub fn chat_box(mut self, dataset: ChatBoxDataset) -> Self {
        self.chat_box = Some(dataset);
        self
    }

    /// Add a handshake header. Invalid names or values are skipped.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name),
            HeaderValue::try_from(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Offer a subprotocol.
    pub fn subprotocol(mut self, protocol: impl Into<String>) -> Self {
        self.subprotocols.push(protocol.into());
        self
    }

    /// Send the given session cookie with the handshake.
    pub fn session_cookie(mut self, value: impl Into<String>) -> Self {
        self.session_cookie = Some(value.into());
        self
    }

    /// Set handshake timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<ChatConfig, ChatError> {
        let location = self.location.ok_or(ChatError::MissingConfig("page_url"))?;
        let chat_box = self.chat_box.ok_or(ChatError::MissingConfig("chat_box"))?;

        Ok(ChatConfig {
            location,
            room: chat_box.room,
            identity: chat_box.identity,
            headers: self.headers,
            subprotocols: self.subprotocols,
            session_cookie: self.session_cookie,
            connect_timeout: self.connect_timeout,
        })
    }
}
