//! Conversion logic between DTOs and domain entities.

use roomcast_shared::time::timestamp_to_rfc3339;

use crate::domain::RoomSnapshot;
use crate::infrastructure::dto::http::RoomSummaryDto;

impl From<RoomSnapshot> for RoomSummaryDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            id: snapshot.id.into_string(),
            owner: snapshot.owner.map(|login| login.as_str().to_string()),
            members: snapshot.member_count,
            created_at: timestamp_to_rfc3339(snapshot.created_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Login, RoomId, Timestamp};

    #[test]
    fn test_room_snapshot_to_dto() {
        // checks: room snapshot to dto
        // given (precondition):
        let snapshot = RoomSnapshot {
            id: RoomId::new("r1".to_string()).unwrap(),
            owner: Some(Login::new("alice".to_string()).unwrap()),
            created_at: Timestamp::new(1672531200000),
            member_count: 2,
        };

        // when (operation):
        let dto: RoomSummaryDto = snapshot.into();

        // then (expected result):
        assert_eq!(
            dto,
            RoomSummaryDto {
                id: "r1".to_string(),
                owner: Some("alice".to_string()),
                members: 2,
                created_at: "2023-01-01T00:00:00.000Z".to_string(),
            }
        );
    }
}
