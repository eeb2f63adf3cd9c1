use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Open,
    RandomizationInProgress,
    Completed,
    Closed,
}

impl RoomStatus {
    /// Only open rooms accept membership changes.
    pub fn is_open(self) -> bool {
        matches!(self, RoomStatus::Open)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, Default)]
pub struct RoomStore {
    rooms: HashMap<String, Room>,
}

impl RoomStore {
    pub fn seeded() -> Self {
        let mut store = Self::default();
        store.reset();
        store
    }

    pub fn reset(&mut self) {
        self.rooms.clear();
        self.set_status("r1", RoomStatus::Open);
        self.set_status("r2", RoomStatus::Closed);
    }

    /// Unknown rooms count as closed.
    pub fn status_of(&self, room_id: &str) -> RoomStatus {
        self.rooms
            .get(room_id)
            .map_or(RoomStatus::Closed, |room| room.status)
    }

    pub fn set_status(&mut self, room_id: &str, status: RoomStatus) {
        self.rooms
            .entry(room_id.to_owned())
            .and_modify(|room| room.status = status)
            .or_insert_with(|| Room {
                id: room_id.to_owned(),
                status,
            });
    }
}
