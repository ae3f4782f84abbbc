//! Room groups - who is listening in which room.

use crate::page::RoomId;
use crate::ws::Message;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// Identifier of one relay connection.
pub type MemberId = u64;

/// Members of every room, keyed by room.
#[derive(Debug, Default)]
pub struct RoomGroups {
    rooms: DashMap<RoomId, Vec<(MemberId, mpsc::UnboundedSender<Message>)>>,
    next_id: AtomicU64,
}

impl RoomGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member to a room. Frames for the member arrive on the
    /// returned receiver.
    pub fn join(&self, room: &RoomId) -> (MemberId, mpsc::UnboundedReceiver<Message>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.rooms.entry(room.clone()).or_default().push((id, tx));
        (id, rx)
    }

    /// Remove a member. Empty rooms are dropped.
    pub fn leave(&self, room: &RoomId, id: MemberId) {
        if let Some(mut members) = self.rooms.get_mut(room) {
            members.retain(|(member, _)| *member != id);
        }
        self.rooms.remove_if(room, |_, members| members.is_empty());
    }

    /// Send a frame to every member of a room. Returns how many members
    /// received it.
    pub fn broadcast(&self, room: &RoomId, msg: &Message) -> usize {
        let Some(members) = self.rooms.get(room) else {
            return 0;
        };
        members
            .iter()
            .filter(|(_, tx)| tx.send(msg.clone()).is_ok())
            .count()
    }

    pub fn members(&self, room: &RoomId) -> usize {
        self.rooms.get(room).map_or(0, |members| members.len())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str) -> RoomId {
        RoomId::new(id).unwrap()
    }

    #[test]
    fn test_join_and_leave() {
        let groups = RoomGroups::new();
        let (a, _rx_a) = groups.join(&room("1"));
        let (b, _rx_b) = groups.join(&room("1"));
        assert_ne!(a, b);
        assert_eq!(groups.members(&room("1")), 2);

        groups.leave(&room("1"), a);
        assert_eq!(groups.members(&room("1")), 1);
        groups.leave(&room("1"), b);
        assert_eq!(groups.room_count(), 0);
    }

    #[test]
    fn test_broadcast_stays_in_room() {
        let groups = RoomGroups::new();
        let (_, mut rx_a) = groups.join(&room("1"));
        let (_, mut rx_b) = groups.join(&room("1"));
        let (_, mut rx_other) = groups.join(&room("2"));

        let msg = Message::Text("hi".into());
        assert_eq!(groups.broadcast(&room("1"), &msg), 2);
        assert_eq!(rx_a.try_recv().unwrap(), msg);
        assert_eq!(rx_b.try_recv().unwrap(), msg);
        assert!(rx_other.try_recv().is_err());
    }

    #[test]
    fn test_broadcast_skips_gone_members() {
        let groups = RoomGroups::new();
        let (_, rx_a) = groups.join(&room("1"));
        let (_, _rx_b) = groups.join(&room("1"));
        drop(rx_a);
        assert_eq!(groups.broadcast(&room("1"), &Message::Text("x".into())), 1);
        assert_eq!(groups.broadcast(&room("9"), &Message::Text("x".into())), 0);
    }
}
