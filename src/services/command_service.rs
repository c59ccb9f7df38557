//! Chat command dispatch. Every game rule violation is answered with a chat
//! message here, so the transport only has to deliver what it gets back.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    error::ServiceError,
    messages,
    state::{
        ChatId, SharedState, UserId,
        game::{GameError, GameMode, GameSession, RoundOutcome},
        roster::RosterError,
    },
};

/// Bot command menu: Italian command names with their descriptions.
pub const COMMANDS: &[(&str, &str)] = &[
    ("aiuto", "Mostra istruzioni"),
    ("parole", "Parole caricate"),
    ("riavvia", "Inizia un nuovo gioco"),
    ("giocatori", "Elenco dei giocatori"),
    ("partecipa", "Aggiungiti come partecipante"),
    ("gioco1", "Inizia una nuova partita del gioco1"),
    ("gioco2", "Inizia una nuova partita del gioco2"),
];

/// Kind of chat a command was sent from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl ChatKind {
    /// Games can only be played in group chats.
    pub fn is_group(self) -> bool {
        matches!(self, Self::Group | Self::Supergroup)
    }
}

/// Chat a command was received in.
#[derive(Debug, Clone)]
pub struct ChatContext {
    pub id: ChatId,
    pub title: String,
    pub kind: ChatKind,
}

/// User who sent a command.
#[derive(Debug, Clone)]
pub struct Sender {
    pub id: UserId,
    pub username: Option<String>,
    pub first_name: String,
}

impl Sender {
    /// `@username`, or an empty handle for users without one.
    pub fn handle(&self) -> String {
        self.username
            .as_deref()
            .map(|username| format!("@{username}"))
            .unwrap_or_default()
    }
}

/// Where an outgoing message must be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Recipient {
    /// The chat the command came from.
    Chat(ChatId),
    /// A private message to a player.
    User(UserId),
}

/// A MarkdownV2 message for the transport to deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub recipient: Recipient,
    pub text: String,
}

impl OutgoingMessage {
    fn to_chat(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            recipient: Recipient::Chat(chat_id),
            text: text.into(),
        }
    }
}

/// Commands that operate on a chat's game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Words,
    Restart,
    Players,
    Enrol,
    Play(GameMode),
}

/// A parsed chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Session(SessionCommand),
    Unknown,
}

impl Command {
    /// Parse the first token of `text` (`/name` or `/name@bot`), accepting
    /// Italian names and their English aliases.
    pub fn parse(text: &str) -> Self {
        let Some(name) = text
            .split_whitespace()
            .next()
            .and_then(|token| token.strip_prefix('/'))
            .and_then(|token| token.split('@').next())
        else {
            return Self::Unknown;
        };

        match name.to_lowercase().as_str() {
            "start" | "via" => Self::Start,
            "help" | "aiuto" => Self::Help,
            "words" | "parole" => Self::Session(SessionCommand::Words),
            "restart" | "riavvia" => Self::Session(SessionCommand::Restart),
            "players" | "giocatori" => Self::Session(SessionCommand::Players),
            "enrol" | "partecipa" => Self::Session(SessionCommand::Enrol),
            other => Self::play(other).unwrap_or(Self::Unknown),
        }
    }

    /// `gioco<N>` / `play<N>` for a known mode number.
    fn play(name: &str) -> Option<Self> {
        let number = name
            .strip_prefix("gioco")
            .or_else(|| name.strip_prefix("play"))?;
        if number.len() != 1 {
            return None;
        }
        let mode = GameMode::from_number(number.parse().ok()?)?;
        Some(Self::Session(SessionCommand::Play(mode)))
    }
}

/// Handle one chat message and return the messages to deliver.
///
/// Only failing to create the chat's session (word lists unreadable) is
/// reported as an error; everything else becomes a reply.
pub async fn dispatch(
    state: &SharedState,
    chat: &ChatContext,
    sender: &Sender,
    text: &str,
) -> Result<Vec<OutgoingMessage>, ServiceError> {
    let command = Command::parse(text);
    debug!(chat_id = chat.id, sender_id = sender.id, ?command, "dispatching command");

    let session_command = match command {
        Command::Start => return Ok(vec![OutgoingMessage::to_chat(chat.id, messages::WELCOME)]),
        Command::Help => return Ok(vec![OutgoingMessage::to_chat(chat.id, messages::HELP)]),
        Command::Unknown => {
            return Ok(vec![OutgoingMessage::to_chat(
                chat.id,
                messages::COMMAND_NOT_FOUND,
            )]);
        }
        Command::Session(_) if !chat.kind.is_group() => {
            return Ok(vec![OutgoingMessage::to_chat(chat.id, messages::GROUP_ONLY)]);
        }
        Command::Session(session_command) => session_command,
    };

    let session = state.sessions().resolve(chat.id, &chat.title).await?;
    let mut game = session.lock().await;
    Ok(run_session_command(&mut game, session_command, chat, sender))
}

fn run_session_command(
    game: &mut GameSession,
    command: SessionCommand,
    chat: &ChatContext,
    sender: &Sender,
) -> Vec<OutgoingMessage> {
    let reply = |text: String| vec![OutgoingMessage::to_chat(chat.id, text)];

    match command {
        SessionCommand::Words => reply(messages::words_report(&game.categories_report())),
        SessionCommand::Restart => {
            game.reset();
            reply(messages::REGISTRATIONS_OPEN.to_owned())
        }
        SessionCommand::Players => reply(messages::players_report(&game.players_report())),
        SessionCommand::Enrol => {
            match game.add_player(sender.id, sender.handle(), &sender.first_name) {
                Ok(player) => reply(messages::enrolled(&player.name)),
                Err(err) => reply(user_message(chat.id, &err)),
            }
        }
        SessionCommand::Play(mode) => {
            let label = game.title().to_owned();
            match game.play_round(mode, &label) {
                Ok(outcome) => round_messages(chat.id, outcome),
                Err(err) => reply(user_message(chat.id, &err)),
            }
        }
    }
}

/// Private notes for every player followed by the group broadcast.
fn round_messages(chat_id: ChatId, outcome: RoundOutcome) -> Vec<OutgoingMessage> {
    info!(
        chat_id,
        round = outcome.round,
        mode = outcome.mode.number(),
        players = outcome.notes.len(),
        "round notes ready"
    );
    let mut out = outcome
        .notes
        .into_iter()
        .map(|(player, text)| OutgoingMessage {
            recipient: Recipient::User(player.id),
            text,
        })
        .collect::<Vec<_>>();
    out.push(OutgoingMessage::to_chat(chat_id, outcome.broadcast));
    out
}

/// Translate a game error into the reply shown in the chat.
fn user_message(chat_id: ChatId, err: &GameError) -> String {
    match err {
        GameError::NotEnoughPlayers { .. } => messages::NOT_ENOUGH_PLAYERS.to_owned(),
        GameError::InsufficientWords {
            available,
            required,
        } => {
            warn!(chat_id, available, required, "word catalog exhausted");
            messages::insufficient_words(*available, *required)
        }
        GameError::NoActiveRound => messages::NO_ACTIVE_ROUND.to_owned(),
        GameError::Roster(RosterError::AlreadyEnrolled { name, .. }) => {
            messages::already_enrolled(name)
        }
        GameError::NotAssigned(_) | GameError::Catalog(_) => {
            error!(chat_id, error = %err, "unexpected game state");
            messages::INTERNAL_ERROR.to_owned()
        }
    }
}
