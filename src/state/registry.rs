use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{error, info};

use super::{
    assignment::AssignmentEngine,
    catalog::{CatalogError, WordCatalog},
    game::GameSession,
};

/// Opaque identifier the chat platform assigns to a chat.
pub type ChatId = i64;

/// A session guarded by its own lock; mutations of one chat never block another.
pub type SharedSession = Arc<Mutex<GameSession>>;

/// Owned map from chat id to its game session.
///
/// Entries are created lazily on first reference and never removed.
pub struct SessionRegistry {
    sessions: DashMap<ChatId, SharedSession>,
    words_dir: PathBuf,
    rng_seed: Option<u64>,
}

impl SessionRegistry {
    /// Registry loading word lists from `words_dir`.
    ///
    /// With `rng_seed` set every session's generator is seeded from it and the
    /// chat id, which makes draws reproducible.
    pub fn new(words_dir: impl Into<PathBuf>, rng_seed: Option<u64>) -> Self {
        Self {
            sessions: DashMap::new(),
            words_dir: words_dir.into(),
            rng_seed,
        }
    }

    /// Directory word lists are loaded from.
    pub fn words_dir(&self) -> &Path {
        &self.words_dir
    }

    /// Return the session of `chat_id`, creating it (and loading its catalog) on first use.
    ///
    /// The catalog is read on the blocking pool before the map entry is taken,
    /// so other chats are never held up by file I/O. Concurrent first references
    /// to the same chat may both load, but only one session is stored and shared.
    pub async fn resolve(
        &self,
        chat_id: ChatId,
        chat_title: &str,
    ) -> Result<SharedSession, CatalogError> {
        if let Some(existing) = self.get(chat_id) {
            return Ok(existing);
        }

        let words_dir = self.words_dir.clone();
        let catalog = tokio::task::spawn_blocking(move || WordCatalog::load(words_dir))
            .await
            .map_err(|err| CatalogError::Load {
                path: self.words_dir.clone(),
                source: io::Error::other(err),
            })
            .and_then(|loaded| loaded)
            .inspect_err(|err| {
                error!(chat_id, error = %err, "failed to load word catalog for new session");
            })?;

        Ok(self.insert_loaded(chat_id, chat_title, catalog))
    }

    /// Store a session built from `catalog` unless another caller got there first.
    fn insert_loaded(
        &self,
        chat_id: ChatId,
        chat_title: &str,
        catalog: WordCatalog,
    ) -> SharedSession {
        let entry = self
            .sessions
            .entry(chat_id)
            .or_insert_with(|| self.create(chat_id, chat_title, catalog));
        Arc::clone(entry.value())
    }

    /// Session of `chat_id` if one was already created.
    pub fn get(&self, chat_id: ChatId) -> Option<SharedSession> {
        self.sessions
            .get(&chat_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Number of sessions created so far.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session has been created yet.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn create(&self, chat_id: ChatId, chat_title: &str, catalog: WordCatalog) -> SharedSession {
        let engine = match self.rng_seed {
            Some(seed) => AssignmentEngine::seeded(seed ^ chat_id as u64),
            None => AssignmentEngine::from_os_rng(),
        };
        info!(chat_id, title = %chat_title, "game session created");
        Arc::new(Mutex::new(GameSession::new(
            chat_id, chat_title, catalog, engine,
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::state::game::GameMode;

    fn words_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cose"), "sole\nluna\nmare\ncielo\n").unwrap();
        dir
    }

    #[tokio::test]
    async fn resolve_creates_once_per_chat() {
        let dir = words_dir();
        let registry = SessionRegistry::new(dir.path(), Some(5));

        let first = registry.resolve(-1, "Cena").await.unwrap();
        let again = registry.resolve(-1, "Renamed").await.unwrap();
        let other = registry.resolve(-2, "Pranzo").await.unwrap();

        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(registry.len(), 2);
        assert_eq!(again.lock().await.title(), "Cena");
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let dir = words_dir();
        let registry = SessionRegistry::new(dir.path(), Some(5));

        {
            let session = registry.resolve(-1, "Cena").await.unwrap();
            let mut game = session.lock().await;
            game.add_player(1, "", "Anna").unwrap();
            game.add_player(2, "", "Bruno").unwrap();
            game.start_round(GameMode::HiddenWord).unwrap();
        }

        let other = registry.resolve(-2, "Pranzo").await.unwrap();
        let game = other.lock().await;
        assert_eq!(game.player_count(), 0);
        assert_eq!(game.catalog().available_count(), 4);
    }

    #[tokio::test]
    async fn concurrent_enrollment_is_serialized() {
        let dir = words_dir();
        let registry = Arc::new(SessionRegistry::new(dir.path(), None));

        let handles = (0..8)
            .map(|id| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    let session = registry.resolve(-7, "Cena").await.unwrap();
                    let mut game = session.lock().await;
                    game.add_player(id, "", &format!("giocatore {id}")).unwrap();
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.len(), 1);
        let session = registry.get(-7).unwrap();
        assert_eq!(session.lock().await.player_count(), 8);
    }

    #[tokio::test]
    async fn session_stored_during_a_load_wins() {
        let dir = words_dir();
        let registry = SessionRegistry::new(dir.path(), Some(5));

        let stored = registry.resolve(-3, "Cena").await.unwrap();
        stored.lock().await.add_player(1, "", "Anna").unwrap();

        let late_catalog = WordCatalog::load(dir.path()).unwrap();
        let settled = registry.insert_loaded(-3, "Cena", late_catalog);

        assert!(Arc::ptr_eq(&stored, &settled));
        assert_eq!(settled.lock().await.player_count(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn slow_chat_creation_does_not_block_existing_chats() {
        let dir = words_dir();
        let registry = Arc::new(SessionRegistry::new(dir.path(), Some(5)));
        let existing = registry.resolve(-1, "Cena").await.unwrap();

        let creators = (2..40)
            .map(|chat| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.resolve(-chat, "Pranzo").await })
            })
            .collect::<Vec<_>>();
        for _ in 0..40 {
            let found = registry.resolve(-1, "Cena").await.unwrap();
            assert!(Arc::ptr_eq(&existing, &found));
            tokio::task::yield_now().await;
        }
        for creator in creators {
            assert!(creator.await.unwrap().is_ok());
        }

        assert_eq!(registry.len(), 39);
    }

    #[tokio::test]
    async fn load_failure_creates_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let registry = SessionRegistry::new(dir.path().join("missing"), None);

        assert!(registry.resolve(-1, "Cena").await.is_err());
        assert!(registry.is_empty());
        assert!(registry.get(-1).is_none());
    }
}
