//! Room entity: membership of one chat and fan-out delivery to it.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use super::{
    connection::{Connection, MemberHandle},
    error::ConnectionError,
    value_object::{ConnectionId, Login, RoomId, Timestamp},
};

/// A room behind its own lock.
///
/// The lock guards membership only; it is never held while the registry lock
/// is held.
pub type SharedRoom = Arc<Mutex<Room>>;

/// Outcome of a fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Members the payload was queued for.
    pub delivered: usize,
    /// Members whose delivery failed; they were closed and removed.
    pub pruned: usize,
}

/// Read-only view of a room for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub owner: Option<Login>,
    pub created_at: Timestamp,
    pub member_count: usize,
}

pub struct Room {
    pub id: RoomId,
    pub owner: Option<Login>,
    pub created_at: Timestamp,
    members: HashMap<ConnectionId, MemberHandle>,
    closed: bool,
}

impl Room {
    pub fn new(id: RoomId, owner: Option<Login>, created_at: Timestamp) -> Self {
        Self {
            id,
            owner,
            created_at,
            members: HashMap::new(),
            closed: false,
        }
    }

    pub fn into_shared(self) -> SharedRoom {
        Arc::new(Mutex::new(self))
    }

    /// Insert `member`. Returns `false` when it was already a member or the
    /// room has been closed.
    pub fn add_member(&mut self, member: MemberHandle) -> bool {
        let id = member.id();
        if self.closed || self.members.contains_key(&id) {
            return false;
        }
        self.members.insert(id, member);
        true
    }

    /// Remove a member. Returns `false` when it was not a member.
    pub fn remove_member(&mut self, id: &ConnectionId) -> bool {
        self.members.remove(id).is_some()
    }

    pub fn contains_member(&self, id: &ConnectionId) -> bool {
        self.members.contains_key(id)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn member_ids(&self) -> Vec<ConnectionId> {
        let mut ids: Vec<ConnectionId> = self.members.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Deliver `payload` to every member.
    ///
    /// Each delivery is independent. Members that fail are closed and removed
    /// after the pass, so one broken peer never stops the others from
    /// receiving the payload.
    pub fn broadcast(&mut self, payload: &str) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        let mut failed = Vec::new();

        for (id, member) in &self.members {
            match member.send(payload) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!("Pruning member {} from room '{}': {}", id, self.id, e);
                    failed.push(*id);
                }
            }
        }

        for id in failed {
            if let Some(member) = self.members.remove(&id) {
                member.close();
                report.pruned += 1;
            }
        }

        report
    }

    /// Deliver `payload` to a single member, pruning it on failure.
    ///
    /// Sending to a connection that is not a member is a no-op.
    pub fn send_to(&mut self, id: &ConnectionId, payload: &str) -> Result<(), ConnectionError> {
        let Some(member) = self.members.get(id) else {
            return Ok(());
        };
        if let Err(e) = member.send(payload) {
            tracing::warn!("Pruning member {} from room '{}': {}", id, self.id, e);
            if let Some(member) = self.members.remove(id) {
                member.close();
            }
            return Err(e);
        }
        Ok(())
    }

    /// Close every member connection and clear membership.
    ///
    /// A closed room accepts no new members; callers that raced with the close
    /// must look the id up in the registry again.
    pub fn close(&mut self) -> usize {
        self.closed = true;
        let closed = self.members.len();
        for (_, member) in self.members.drain() {
            member.close();
        }
        closed
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            id: self.id.clone(),
            owner: self.owner.clone(),
            created_at: self.created_at,
            member_count: self.members.len(),
        }
    }
}
