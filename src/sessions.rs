use crate::user_models::User;
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sid";

/// One-shot notification shown by the next rendered view.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FlashMessage {
    pub category: String,
    pub message: String,
}

/// Server-side session state tied to a cookie token.
///
/// A session starts anonymous and becomes authenticated on login or
/// registration; anonymous sessions exist only to carry flash messages.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    pub user_id: Option<String>,
    pub username: Option<String>,
    flash: Vec<FlashMessage>,
}

impl SessionData {
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// In-memory session store. Sessions do not survive a restart, matching the
/// default memory-backed session collaborator this replaces.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionData>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an authenticated session for `user` and returns its token.
    pub async fn create_authenticated(&self, user: &User) -> String {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            token.clone(),
            SessionData {
                user_id: Some(user.id.clone()),
                username: Some(user.username.clone()),
                flash: Vec::new(),
            },
        );
        token
    }

    /// Starts an anonymous session and returns its token.
    pub async fn create_anonymous(&self) -> String {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), SessionData::default());
        token
    }

    pub async fn get(&self, token: &str) -> Option<SessionData> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    pub async fn is_authenticated(&self, token: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .map(|s| s.is_authenticated())
            .unwrap_or(false)
    }

    /// Ends the session; unknown tokens are a no-op.
    pub async fn destroy(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }

    /// Queues a flash message on the session. Dropped silently when the
    /// token no longer resolves.
    pub async fn flash(&self, token: &str, category: &str, message: &str) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(token) {
            session.flash.push(FlashMessage {
                category: category.to_string(),
                message: message.to_string(),
            });
        }
    }

    /// Drains the queued flash messages; a second read returns nothing.
    pub async fn take_flash(&self, token: &str) -> Vec<FlashMessage> {
        let mut sessions = self.sessions.write().await;
        sessions
            .get_mut(token)
            .map(|s| std::mem::take(&mut s.flash))
            .unwrap_or_default()
    }
}

/// Pulls the session token out of the request's `Cookie` header.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;

    for pair in cookies.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let name = parts.next()?;
        if name == SESSION_COOKIE {
            return parts.next().map(|v| v.to_string());
        }
    }
    None
}

/// `Set-Cookie` value that attaches a session to the browser.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}
