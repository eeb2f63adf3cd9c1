mod rooms;
mod users;

pub use rooms::{Room, RoomStatus, RoomStore};
pub use users::{Role, User, UserStore};

/// Both in-memory collections, kept together so a removal can hold one lock.
#[derive(Debug, Clone)]
pub struct Stores {
    pub users: UserStore,
    pub rooms: RoomStore,
}

impl Stores {
    pub fn seeded() -> Self {
        Self {
            users: UserStore::seeded(),
            rooms: RoomStore::seeded(),
        }
    }

    /// Puts both stores back to the seed. Test harness only.
    pub fn reset(&mut self) {
        self.users.reset();
        self.rooms.reset();
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::seeded()
    }
}
