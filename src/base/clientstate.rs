/// The lifecycle state of a chat client.
///
/// There is no way back from `Closed`: the client stays inert until the
/// host builds a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientState {
    /// The socket is open; frames flow both ways.
    #[default]
    Connected,

    /// The socket was closed by the server or the transport failed.
    Closed,
}

impl ClientState {
    pub fn is_closed(&self) -> bool {
        matches!(self, ClientState::Closed)
    }
}
