use axum::Router;

use crate::state::SharedState;

pub mod commands;
pub mod health;
pub mod sessions;

/// Compose all route trees and wire in the shared state.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(commands::router())
        .merge(sessions::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::{config::AppConfig, state::AppState};

    fn app() -> (TempDir, Router<()>) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cose"), "sole\nluna\nmare\ncielo\n").unwrap();
        let state = AppState::new(AppConfig::new(dir.path(), Some(9)));
        (dir, router(state))
    }

    async fn send(app: &Router<()>, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn command(chat_id: i64, user_id: i64, name: &str, text: &str) -> Request<Body> {
        let payload = json!({
            "chat_title": "Cena",
            "chat_kind": "group",
            "sender": { "id": user_id, "username": name.to_lowercase(), "first_name": name },
            "text": text,
        });
        Request::post(format!("/chats/{chat_id}/commands"))
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn healthcheck_reports_sessions() {
        let (_dir, app) = app();
        let (status, body) = send(&app, Request::get("/healthcheck").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok", "sessions": 0 }));
    }

    #[tokio::test]
    async fn command_menu_is_listed() {
        let (_dir, app) = app();
        let (status, body) = send(&app, Request::get("/commands").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 7);
        assert_eq!(body[0]["command"], "aiuto");
    }

    #[tokio::test]
    async fn full_round_over_http() {
        let (_dir, app) = app();
        send(&app, command(-5, 1, "Anna", "/partecipa")).await;
        send(&app, command(-5, 2, "Bruno", "/partecipa")).await;

        let (status, body) = send(&app, command(-5, 1, "Anna", "/gioco1")).await;

        assert_eq!(status, StatusCode::OK);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["recipient"], json!({ "kind": "user", "id": 1 }));
        assert_eq!(messages[2]["recipient"], json!({ "kind": "chat", "id": -5 }));

        let (status, players) = send(
            &app,
            Request::get("/chats/-5/players").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(players["summary"], "Anna e Bruno");
        assert_eq!(players["round"], 1);
        assert_eq!(players["mode"], "guess_who_you_are");

        let (_, words) = send(&app, Request::get("/chats/-5/words").body(Body::empty()).unwrap()).await;
        assert_eq!(words["categories"][0]["used"], 2);
        assert_eq!(words["categories"][0]["remaining"], 2);
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected() {
        let (_dir, app) = app();
        let (status, _) = send(&app, command(-5, 1, "", "/partecipa")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn reports_for_unknown_chat_are_not_found() {
        let (_dir, app) = app();
        let (status, body) = send(
            &app,
            Request::get("/chats/-99/words").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("-99"));
    }
}
