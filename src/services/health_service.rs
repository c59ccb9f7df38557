use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether new sessions can be created, logging when the word lists are unreadable.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let sessions = state.sessions().len();
    let words_dir = state.sessions().words_dir();

    match tokio::fs::metadata(words_dir).await {
        Ok(metadata) if metadata.is_dir() => HealthResponse::ok(sessions),
        Ok(_) => {
            warn!(path = %words_dir.display(), "word source is not a directory");
            HealthResponse::degraded(sessions)
        }
        Err(err) => {
            warn!(path = %words_dir.display(), error = %err, "word source unavailable");
            HealthResponse::degraded(sessions)
        }
    }
}
