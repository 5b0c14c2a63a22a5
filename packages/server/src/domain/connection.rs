//! Member connection seam.
//!
//! The transport owns the socket; rooms only hold a handle that can queue a
//! payload or close the channel. Sending never waits on the network: a
//! connection that cannot accept a payload right away reports an error and is
//! pruned by the caller.

use std::sync::Arc;

use super::{error::ConnectionError, value_object::ConnectionId};

#[cfg_attr(test, mockall::automock)]
pub trait Connection: Send + Sync {
    /// Stable identifier used for membership uniqueness.
    fn id(&self) -> ConnectionId;

    /// Queue `payload` for delivery to the remote peer.
    fn send(&self, payload: &str) -> Result<(), ConnectionError>;

    /// Close the channel. Idempotent.
    fn close(&self);
}

pub type MemberHandle = Arc<dyn Connection>;
