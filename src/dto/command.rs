use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    dto::validation::validate_username,
    services::command_service::{ChatContext, ChatKind, OutgoingMessage, Sender},
    state::{ChatId, UserId},
};

/// Incoming chat command forwarded by the transport.
#[derive(Debug, Deserialize, Validate)]
pub struct CommandRequest {
    /// Chat title; private chats have none.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub chat_title: String,
    pub chat_kind: ChatKind,
    #[validate(nested)]
    pub sender: SenderInput,
    /// Raw message text, e.g. `/gioco1@IndovinaTiBot`.
    #[validate(length(min = 1, max = 4096))]
    pub text: String,
}

/// Author of the command.
#[derive(Debug, Deserialize, Validate)]
pub struct SenderInput {
    pub id: UserId,
    #[serde(default)]
    #[validate(custom(function = "validate_username"))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
}

impl CommandRequest {
    /// Split the payload into the chat and sender values the command service expects.
    pub fn into_parts(self, chat_id: ChatId) -> (ChatContext, Sender, String) {
        let chat = ChatContext {
            id: chat_id,
            title: self.chat_title,
            kind: self.chat_kind,
        };
        let sender = Sender {
            id: self.sender.id,
            username: self.sender.username,
            first_name: self.sender.first_name,
        };
        (chat, sender, self.text)
    }
}

/// Messages the transport must deliver, in order.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub messages: Vec<OutgoingMessage>,
}

/// One entry of the bot command menu.
#[derive(Debug, Serialize)]
pub struct CommandInfo {
    pub command: &'static str,
    pub description: &'static str,
}
