use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::report::{PlayersReport, WordsReport},
    error::{AppError, ServiceError},
    state::{ChatId, SharedSession, SharedState},
};

/// Read-only views over existing chat sessions.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/chats/{chat_id}/words", get(words_report))
        .route("/chats/{chat_id}/players", get(players_report))
}

/// Word inventory and usage of a chat.
pub async fn words_report(
    State(state): State<SharedState>,
    Path(chat_id): Path<ChatId>,
) -> Result<Json<WordsReport>, AppError> {
    let session = existing_session(&state, chat_id)?;
    let game = session.lock().await;
    Ok(Json(WordsReport::from(&*game)))
}

/// Roster and round state of a chat.
pub async fn players_report(
    State(state): State<SharedState>,
    Path(chat_id): Path<ChatId>,
) -> Result<Json<PlayersReport>, AppError> {
    let session = existing_session(&state, chat_id)?;
    let game = session.lock().await;
    Ok(Json(PlayersReport::from(&*game)))
}

fn existing_session(state: &SharedState, chat_id: ChatId) -> Result<SharedSession, ServiceError> {
    state
        .sessions()
        .get(chat_id)
        .ok_or_else(|| ServiceError::NotFound(format!("no game session for chat `{chat_id}`")))
}
