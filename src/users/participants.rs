use axum::{
    debug_handler,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{store::Role, AppError, AppResult, AppState, SharedStores};

#[derive(Deserialize)]
pub(crate) struct ParticipantsQuery {
    #[serde(rename = "roomId")]
    room_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Participant {
    id: String,
    name: String,
    role: Role,
    room_id: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn participants(
    query: Result<Query<ParticipantsQuery>, QueryRejection>,
    State(stores): State<SharedStores>,
) -> AppResult<Json<Vec<Participant>>> {
    let Query(ParticipantsQuery { room_id }) = query?;
    let Some(room_id) = room_id.filter(|id| !id.is_empty()) else {
        return Err(AppError::invalid("INVALID_ROOM_ID"));
    };

    let stores = stores.read().await;
    let participants = stores
        .users
        .in_room(&room_id)
        .map(|user| Participant {
            id: user.id.clone(),
            // no display names yet
            name: user.id.clone(),
            role: user.role,
            room_id: user.room_id.clone(),
        })
        .collect();

    Ok(Json(participants))
}
