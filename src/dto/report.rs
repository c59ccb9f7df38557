use serde::Serialize;

use crate::state::{
    ChatId,
    catalog::CategoryStats,
    game::{GameMode, GameSession},
    roster::Player,
};

/// Usage counters of one category.
#[derive(Debug, Serialize, Clone)]
pub struct CategoryStatsDto {
    pub category: String,
    pub total: usize,
    pub used: usize,
    pub remaining: usize,
}

impl From<CategoryStats> for CategoryStatsDto {
    fn from(stats: CategoryStats) -> Self {
        Self {
            remaining: stats.remaining(),
            category: stats.category,
            total: stats.total,
            used: stats.used,
        }
    }
}

/// Word inventory of a chat session.
#[derive(Debug, Serialize)]
pub struct WordsReport {
    pub chat_id: ChatId,
    pub categories: Vec<CategoryStatsDto>,
    /// Column-aligned text version of `categories`.
    pub report: String,
}

impl From<&GameSession> for WordsReport {
    fn from(session: &GameSession) -> Self {
        Self {
            chat_id: session.chat_id(),
            categories: session
                .catalog()
                .stats()
                .into_iter()
                .map(Into::into)
                .collect(),
            report: session.categories_report(),
        }
    }
}

/// Roster and round state of a chat session.
#[derive(Debug, Serialize)]
pub struct PlayersReport {
    pub chat_id: ChatId,
    pub players: Vec<Player>,
    pub summary: String,
    /// Last started round, 0 before the first one.
    pub round: u32,
    /// Mode of the running round, absent in the lobby.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<GameMode>,
}

impl From<&GameSession> for PlayersReport {
    fn from(session: &GameSession) -> Self {
        Self {
            chat_id: session.chat_id(),
            players: session.roster().players().to_vec(),
            summary: session.players_report(),
            round: session.round(),
            mode: session.mode(),
        }
    }
}
