use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::command::{CommandInfo, CommandRequest, CommandResponse},
    error::AppError,
    services::command_service::{self, COMMANDS},
    state::{ChatId, SharedState},
};

/// Routes the chat transport calls: command menu and command dispatch.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/commands", get(list_commands))
        .route("/chats/{chat_id}/commands", post(handle_command))
}

/// Command menu to register with the chat platform.
pub async fn list_commands() -> Json<Vec<CommandInfo>> {
    Json(
        COMMANDS
            .iter()
            .map(|&(command, description)| CommandInfo {
                command,
                description,
            })
            .collect(),
    )
}

/// Dispatch a chat message and return the messages to deliver.
pub async fn handle_command(
    State(state): State<SharedState>,
    Path(chat_id): Path<ChatId>,
    Json(payload): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, AppError> {
    payload.validate()?;
    let (chat, sender, text) = payload.into_parts(chat_id);
    let messages = command_service::dispatch(&state, &chat, &sender, &text).await?;
    Ok(Json(CommandResponse { messages }))
}
