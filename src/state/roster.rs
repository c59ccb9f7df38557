use serde::Serialize;
use thiserror::Error;

use super::text::title_case;

/// Opaque identifier the chat platform assigns to a user.
pub type UserId = i64;

/// A participant enrolled in a chat's game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    /// External user identifier, also used to address private notes.
    pub id: UserId,
    /// Display handle (`@username`), possibly empty.
    pub handle: String,
    /// Title-cased display name.
    pub name: String,
}

/// Failures raised while enrolling players.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The user is already part of the roster.
    #[error("player `{name}` ({id}) is already enrolled")]
    AlreadyEnrolled {
        /// Identifier of the existing player.
        id: UserId,
        /// Display name of the existing player.
        name: String,
    },
}

/// Enrolled players, always kept sorted by display name.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enroll a player and return the stored record.
    ///
    /// The roster is re-sorted by display name (stable, so players sharing a
    /// name keep their enrollment order).
    pub fn add(
        &mut self,
        id: UserId,
        handle: impl Into<String>,
        name: &str,
    ) -> Result<Player, RosterError> {
        if let Some(existing) = self.get(id) {
            return Err(RosterError::AlreadyEnrolled {
                id,
                name: existing.name.clone(),
            });
        }

        let player = Player {
            id,
            handle: handle.into(),
            name: title_case(name.trim()),
        };
        self.players.push(player.clone());
        self.players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(player)
    }

    /// Look up a player by identifier.
    pub fn get(&self, id: UserId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Players in display-name order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of enrolled players.
    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// Display names in roster order.
    pub fn names(&self) -> Vec<&str> {
        self.players.iter().map(|player| player.name.as_str()).collect()
    }

    /// Drop every player.
    pub fn clear(&mut self) {
        self.players.clear();
    }

    /// Human readable (Italian) description of who is playing.
    pub fn summary_text(&self) -> String {
        match self.players.as_slice() {
            [] => "Ancora nessuno \u{1F615}".to_owned(),
            [only] => format!(
                "Soltanto {} (serve almeno un altro concorrente)",
                only.name
            ),
            [rest @ .., last] => {
                let names = rest
                    .iter()
                    .map(|player| player.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let conjunction = last
                    .name
                    .chars()
                    .next()
                    .map_or("e", conjunction_for);
                format!("{names} {conjunction} {}", last.name)
            }
        }
    }
}

/// Italian "and": `ed` before a vowel, `e` otherwise.
pub fn conjunction_for(first: char) -> &'static str {
    let vowel = first
        .to_lowercase()
        .next()
        .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
    if vowel { "ed" } else { "e" }
}
