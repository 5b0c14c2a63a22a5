//! Admin notifier that emits a structured tracing event.

use crate::domain::{AdminEvent, AdminNotifier, RoomId};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAdminNotifier;

impl AdminNotifier for TracingAdminNotifier {
    fn notify(&self, event: AdminEvent, room_id: &RoomId) {
        tracing::info!(
            target: "roomcast_server::admin",
            event = event.as_str(),
            chat_id = room_id.as_str(),
            "Notifying admins about event '{}' in chat '{}'",
            event,
            room_id
        );
    }
}
