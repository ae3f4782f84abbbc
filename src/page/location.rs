//! Page location and chat socket URL.
//!
//! The socket lives on the page's own host. A page served over `https`
//! gets a `wss` socket, a plain `http` page gets `ws`.

use crate::base::chaterror::ChatError;
use crate::page::dataset::RoomId;
use url::Url;

/// Path segments leading to a room socket: `/ws/chat/{room}/`.
const CHAT_SOCKET_PREFIX: [&str; 2] = ["ws", "chat"];

/// The URL of the page hosting the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    /// Parse a page URL. Only `http` and `https` pages are accepted.
    pub fn parse(url: &str) -> Result<Self, ChatError> {
        let url = Url::parse(url).map_err(|_| ChatError::InvalidUrl)?;
        Self::from_url(url)
    }

    pub fn from_url(url: Url) -> Result<Self, ChatError> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ChatError::DisallowedUrlScheme);
        }
        if url.host_str().is_none() {
            return Err(ChatError::InvalidUrl);
        }
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Check if the page is served securely.
    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// The serialized page origin, sent as the handshake `Origin` header.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// Build the room socket URL on this page's host.
    pub fn chat_socket_url(&self, room: &RoomId) -> Result<Url, ChatError> {
        let mut url = self.url.clone();
        let scheme = if self.is_secure() { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|_| ChatError::DisallowedUrlScheme)?;
        url.set_query(None);
        url.set_fragment(None);
        url.set_username("").map_err(|_| ChatError::InvalidUrl)?;
        url.set_password(None).map_err(|_| ChatError::InvalidUrl)?;

        url.path_segments_mut()
            .map_err(|_| ChatError::InvalidUrl)?
            .clear()
            .extend(CHAT_SOCKET_PREFIX)
            .push(room.as_str())
            .push("");

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str) -> RoomId {
        RoomId::new(id).unwrap()
    }

    #[test]
    fn test_insecure_page() {
        let loc = PageLocation::parse("http://localhost:8000/room/5/").unwrap();
        let url = loc.chat_socket_url(&room("5")).unwrap();
        assert_eq!(url.as_str(), "ws://localhost:8000/ws/chat/5/");
        assert!(!loc.is_secure());
    }

    #[test]
    fn test_secure_page() {
        let loc = PageLocation::parse("https://chat.example.com/room/5/?tab=1#bottom").unwrap();
        let url = loc.chat_socket_url(&room("5")).unwrap();
        assert_eq!(url.as_str(), "wss://chat.example.com/ws/chat/5/");
    }

    #[test]
    fn test_room_is_single_segment() {
        let loc = PageLocation::parse("http://localhost/").unwrap();
        let url = loc.chat_socket_url(&room("a/b c")).unwrap();
        assert_eq!(url.path(), "/ws/chat/a%2Fb%20c/");
    }

    #[test]
    fn test_credentials_dropped() {
        let loc = PageLocation::parse("http://user:pw@localhost:9000/").unwrap();
        let url = loc.chat_socket_url(&room("1")).unwrap();
        assert_eq!(url.as_str(), "ws://localhost:9000/ws/chat/1/");
    }

    #[test]
    fn test_origin() {
        let loc = PageLocation::parse("http://localhost:8000/room/5/").unwrap();
        assert_eq!(loc.origin(), "http://localhost:8000");

        let loc = PageLocation::parse("https://example.com:443/").unwrap();
        assert_eq!(loc.origin(), "https://example.com");
    }

    #[test]
    fn test_disallowed_scheme() {
        assert_eq!(
            PageLocation::parse("file:///tmp/index.html").unwrap_err(),
            ChatError::DisallowedUrlScheme
        );
        assert_eq!(
            PageLocation::parse("not a url").unwrap_err(),
            ChatError::InvalidUrl
        );
    }
}
