//! Deciding whether an admin may remove a participant from their room.

use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;

use crate::store::{Role, RoomStore, User, UserStore};

pub const USER_REMOVED: &str = "USER_REMOVED";

/// Turns an admin code into the user it belongs to.
pub trait CredentialResolver: Send + Sync {
    fn resolve(&self, users: &UserStore, code: &str) -> Option<User>;
}

/// The code is the admin's own user id.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserIdCredentials;

impl<T: CredentialResolver + ?Sized> CredentialResolver for Arc<T> {
    fn resolve(&self, users: &UserStore, code: &str) -> Option<User> {
        (**self).resolve(users, code)
    }
}

impl CredentialResolver for UserIdCredentials {
    fn resolve(&self, users: &UserStore, code: &str) -> Option<User> {
        users.find_by_code(code).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RemovalError {
    #[error("USER_NOT_FOUND")]
    UserNotFound,
    #[error("ADMIN_NOT_FOUND")]
    AdminNotFound,
    #[error("NOT_ADMIN")]
    NotAdmin,
    #[error("DIFFERENT_ROOMS")]
    DifferentRooms,
    #[error("CANNOT_DELETE_SELF")]
    CannotDeleteSelf,
    #[error("ROOM_CLOSED_OR_LOCKED")]
    RoomClosedOrLocked,
}

impl RemovalError {
    pub fn code(self) -> &'static str {
        use RemovalError::*;
        match self {
            UserNotFound => "USER_NOT_FOUND",
            AdminNotFound => "ADMIN_NOT_FOUND",
            NotAdmin => "NOT_ADMIN",
            DifferentRooms => "DIFFERENT_ROOMS",
            CannotDeleteSelf => "CANNOT_DELETE_SELF",
            RoomClosedOrLocked => "ROOM_CLOSED_OR_LOCKED",
        }
    }

    pub fn status(self) -> StatusCode {
        use RemovalError::*;
        match self {
            UserNotFound | AdminNotFound => StatusCode::NOT_FOUND,
            NotAdmin => StatusCode::FORBIDDEN,
            DifferentRooms | RoomClosedOrLocked => StatusCode::CONFLICT,
            CannotDeleteSelf => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Removal {
    pub removed_user_id: String,
    pub room_id: String,
    pub participants_count: usize,
    pub message: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct RemovalPolicy<R = UserIdCredentials> {
    resolver: R,
}

impl<R: CredentialResolver> RemovalPolicy<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Checks run in a fixed order and the first failure wins; callers rely on
    /// that precedence. Nothing is mutated unless every check passes.
    pub fn remove(
        &self,
        users: &mut UserStore,
        rooms: &RoomStore,
        target_id: &str,
        admin_code: &str,
    ) -> Result<Removal, RemovalError> {
        let target = users
            .find_by_id(target_id)
            .cloned()
            .ok_or(RemovalError::UserNotFound)?;

        let admin = self
            .resolver
            .resolve(users, admin_code)
            .ok_or(RemovalError::AdminNotFound)?;

        if admin.role != Role::Admin {
            return Err(RemovalError::NotAdmin);
        }

        if admin.room_id != target.room_id {
            return Err(RemovalError::DifferentRooms);
        }

        if admin.id == target.id {
            return Err(RemovalError::CannotDeleteSelf);
        }

        if !rooms.status_of(&admin.room_id).is_open() {
            return Err(RemovalError::RoomClosedOrLocked);
        }

        users.delete(&target.id);
        let participants_count = users.count_in_room(&admin.room_id);

        Ok(Removal {
            removed_user_id: target.id,
            room_id: admin.room_id,
            participants_count,
            message: USER_REMOVED,
        })
    }
}
