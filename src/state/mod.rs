pub mod assignment;
pub mod catalog;
pub mod game;
pub mod registry;
pub mod roster;
mod text;

use std::sync::Arc;

use crate::config::AppConfig;

pub use self::registry::{ChatId, SessionRegistry, SharedSession};
pub use self::roster::UserId;

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state: configuration and the per-chat game sessions.
pub struct AppState {
    config: AppConfig,
    sessions: SessionRegistry,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        let sessions = SessionRegistry::new(config.words_dir(), config.rng_seed());
        Arc::new(Self { config, sessions })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Registry of game sessions keyed by chat id.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}
