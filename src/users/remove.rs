use axum::{
    debug_handler,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;

use crate::{
    removal::Removal, store::Stores, AppError, AppResult, AppState, SharedPolicy, SharedStores,
};

const MIN_CODE_LEN: usize = 2;

#[derive(Deserialize)]
pub(crate) struct RemoveQuery {
    #[serde(rename = "userCode")]
    user_code: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn remove_user(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<RemoveQuery>, QueryRejection>,
    State(stores): State<SharedStores>,
    State(policy): State<SharedPolicy>,
) -> AppResult<Json<Removal>> {
    let Path(user_id) = path?;
    let Query(RemoveQuery { user_code }) = query?;

    let Some(admin_code) = user_code.filter(|code| code.chars().count() >= MIN_CODE_LEN) else {
        return Err(AppError::invalid("INVALID_USER_CODE"));
    };

    let mut stores = stores.write().await;
    let Stores { users, rooms } = &mut *stores;

    match policy.remove(users, rooms, &user_id, &admin_code) {
        Ok(removal) => {
            tracing::info!(
                user_id = %removal.removed_user_id,
                room_id = %removal.room_id,
                remaining = removal.participants_count,
                "removed participant"
            );
            Ok(Json(removal))
        }
        Err(err) => {
            tracing::warn!(%user_id, code = err.code(), "removal refused");
            Err(err.into())
        }
    }
}
