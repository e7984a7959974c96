use anyhow::Result;
use myflix_config::SessionStore;
use myflix_models::{LoginResponse, User};
use std::collections::HashSet;

/// The authenticated user's context: bearer token plus the cached user
/// record (including the favourites list).
///
/// This is the single source of truth for session state. Components take
/// a `Session` rather than re-reading the store, and the store is only
/// touched on login, logout, and explicit persistence.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    user: User,
}

impl Session {
    pub fn from_login(login: LoginResponse) -> Self {
        let mut session = Self {
            token: login.token,
            user: login.user,
        };
        dedupe_favourites(&mut session.user.favourite_movies);
        session
    }

    /// Restore a session from the store. Returns `None` when no complete
    /// session (token and user object) has been persisted.
    pub fn load(store: &SessionStore) -> Option<Self> {
        let token = store.get_token()?.clone();
        let mut user = store.get_user()?;
        dedupe_favourites(&mut user.favourite_movies);
        Some(Self { token, user })
    }

    pub fn persist(&self, store: &mut SessionStore) -> Result<()> {
        store.set_token(self.token.clone());
        store.set_user_id(self.user.id.clone());
        store.set_user(&self.user)?;
        store.save()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn favourites(&self) -> &[String] {
        &self.user.favourite_movies
    }

    /// Replace the cached user with a fresh copy from the server.
    ///
    /// The favourites list is deduplicated on the way in: a movie id
    /// appears at most once regardless of what the server sent back, so
    /// re-adding an already-favourited movie never duplicates state.
    pub fn set_user(&mut self, mut user: User) {
        dedupe_favourites(&mut user.favourite_movies);
        self.user = user;
    }
}

fn dedupe_favourites(ids: &mut Vec<String>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}
