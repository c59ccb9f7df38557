use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::{
    assignment::{Assignment, AssignmentEngine, DrawError},
    catalog::{CatalogError, WordCatalog},
    registry::ChatId,
    roster::{Player, Roster, RosterError, UserId},
    text::width,
};
use crate::messages;

/// Minimum number of enrolled players required to start a round.
pub const MIN_PLAYERS: usize = 2;

/// Game variants a round can be played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Mode 1: every player sees everyone else's word but not their own.
    GuessWhoYouAre,
    /// Mode 2: every player sees only their own word.
    HiddenWord,
}

impl GameMode {
    /// Map the numeric mode used by the `/gioco<N>` commands.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::GuessWhoYouAre),
            2 => Some(Self::HiddenWord),
            _ => None,
        }
    }

    /// Numeric mode, inverse of [`Self::from_number`].
    pub fn number(self) -> u8 {
        match self {
            Self::GuessWhoYouAre => 1,
            Self::HiddenWord => 2,
        }
    }

    /// Whether the notes of this mode list the other players' words.
    pub fn shows_others(self) -> bool {
        matches!(self, Self::GuessWhoYouAre)
    }
}

/// Assignments of the round currently being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRound {
    /// Mode the round was started with.
    pub mode: GameMode,
    /// Assignments keyed by player id, in roster order.
    pub assignments: IndexMap<UserId, Assignment>,
}

/// Coarse state of a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoundPhase {
    /// Players can enroll; no assignments exist.
    #[default]
    Lobby,
    /// A round is running.
    RoundActive(ActiveRound),
}

/// Errors raised by game session operations.
#[derive(Debug, Error)]
pub enum GameError {
    /// Fewer than [`MIN_PLAYERS`] players are enrolled.
    #[error("at least two players are required, {count} enrolled")]
    NotEnoughPlayers {
        /// Players currently enrolled.
        count: usize,
    },
    /// Not enough unused words remain for every player.
    #[error("not enough words left: {available} available, {required} required")]
    InsufficientWords {
        /// Unused words across every category.
        available: usize,
        /// Words the round needed.
        required: usize,
    },
    /// Notes were requested while no round is being played.
    #[error("no round in progress")]
    NoActiveRound,
    /// The requesting player holds no word in the current round.
    #[error("player {0} is not part of the current round")]
    NotAssigned(UserId),
    /// Enrollment was rejected.
    #[error(transparent)]
    Roster(#[from] RosterError),
    /// Catalog invariant violation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<DrawError> for GameError {
    fn from(err: DrawError) -> Self {
        match err {
            DrawError::InsufficientWords {
                available,
                required,
            } => GameError::InsufficientWords {
                available,
                required,
            },
            DrawError::Catalog(source) => GameError::Catalog(source),
        }
    }
}

/// Everything the transport needs to announce a freshly started round.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// Number of the round that just started.
    pub round: u32,
    /// Mode of the round.
    pub mode: GameMode,
    /// Private notes, one per player, in roster order.
    pub notes: Vec<(Player, String)>,
    /// Text for the whole group.
    pub broadcast: String,
}

/// Per-chat game state: roster, word inventory, round counter and assignments.
#[derive(Debug)]
pub struct GameSession {
    chat_id: ChatId,
    title: String,
    roster: Roster,
    catalog: WordCatalog,
    engine: AssignmentEngine,
    round: u32,
    phase: RoundPhase,
}

impl GameSession {
    /// Build a session around an already loaded catalog.
    pub fn new(
        chat_id: ChatId,
        title: impl Into<String>,
        catalog: WordCatalog,
        engine: AssignmentEngine,
    ) -> Self {
        Self {
            chat_id,
            title: title.into(),
            roster: Roster::new(),
            catalog,
            engine,
            round: 0,
            phase: RoundPhase::Lobby,
        }
    }

    /// Chat this session belongs to.
    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    /// Chat title captured when the session was created.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of the last started round (0 before the first one).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Current coarse state.
    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    /// Mode of the running round, if any.
    pub fn mode(&self) -> Option<GameMode> {
        match &self.phase {
            RoundPhase::RoundActive(active) => Some(active.mode),
            RoundPhase::Lobby => None,
        }
    }

    /// Enrolled players.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Word inventory of this session.
    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    /// Number of enrolled players.
    pub fn player_count(&self) -> usize {
        self.roster.count()
    }

    /// Enroll a player.
    pub fn add_player(
        &mut self,
        id: UserId,
        handle: impl Into<String>,
        name: &str,
    ) -> Result<Player, GameError> {
        let player = self.roster.add(id, handle, name)?;
        info!(chat_id = self.chat_id, player_id = id, name = %player.name, "player enrolled");
        Ok(player)
    }

    /// Back to the lobby: no players, no used words, round counter at 0.
    ///
    /// Word lists are kept as loaded.
    pub fn reset(&mut self) {
        self.roster.clear();
        self.catalog.reset_usage();
        self.round = 0;
        self.phase = RoundPhase::Lobby;
        info!(chat_id = self.chat_id, "session reset");
    }

    /// Catalog stats report.
    pub fn categories_report(&self) -> String {
        self.catalog.stats_report()
    }

    /// Roster summary.
    pub fn players_report(&self) -> String {
        self.roster.summary_text()
    }

    /// Start a new round, drawing one word per enrolled player.
    ///
    /// Nothing changes when the round cannot start.
    pub fn start_round(&mut self, mode: GameMode) -> Result<u32, GameError> {
        let count = self.roster.count();
        if count < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers { count });
        }

        let assignments = self
            .engine
            .assign(&mut self.catalog, self.roster.players())?
            .into_iter()
            .map(|assignment| (assignment.player, assignment))
            .collect::<IndexMap<_, _>>();

        self.round += 1;
        info!(
            chat_id = self.chat_id,
            round = self.round,
            mode = mode.number(),
            assignments = ?assignments.values().collect::<Vec<_>>(),
            "round started"
        );
        info!(chat_id = self.chat_id, "categories stats:\n{}", self.catalog.stats_report());

        self.phase = RoundPhase::RoundActive(ActiveRound { mode, assignments });
        Ok(self.round)
    }

    /// Render the private notes of `player` for the running round.
    ///
    /// With `only_others` every other player's word is listed; otherwise only
    /// the player's own word is. The template follows the round's mode, so
    /// callers pass [`GameMode::shows_others`] to keep both in sync.
    pub fn notes_for(
        &self,
        chat_label: &str,
        player: UserId,
        only_others: bool,
    ) -> Result<String, GameError> {
        let RoundPhase::RoundActive(active) = &self.phase else {
            return Err(GameError::NoActiveRound);
        };
        let own = active
            .assignments
            .get(&player)
            .ok_or(GameError::NotAssigned(player))?;

        let shown: Vec<&Assignment> = if only_others {
            active
                .assignments
                .values()
                .filter(|assignment| assignment.player != player)
                .collect()
        } else {
            vec![own]
        };

        let name_width = shown
            .iter()
            .map(|assignment| width(&assignment.player_name))
            .max()
            .unwrap_or(0);
        let lines = shown
            .iter()
            .map(|assignment| {
                format!(
                    "{:<name_width$} : {} ({})",
                    assignment.player_name, assignment.word, assignment.category
                )
            })
            .collect::<Vec<_>>();

        Ok(messages::round_notes(active.mode, chat_label, self.round, &lines))
    }

    /// Start a round and render every player's notes plus the group broadcast.
    pub fn play_round(&mut self, mode: GameMode, chat_label: &str) -> Result<RoundOutcome, GameError> {
        let round = self.start_round(mode)?;
        let notes = self
            .roster
            .players()
            .iter()
            .map(|player| {
                let text = self.notes_for(chat_label, player.id, mode.shows_others())?;
                Ok((player.clone(), text))
            })
            .collect::<Result<Vec<_>, GameError>>()?;

        Ok(RoundOutcome {
            round,
            mode,
            notes,
            broadcast: messages::ROUND_STARTED.to_owned(),
        })
    }
}
