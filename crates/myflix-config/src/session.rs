use anyhow::Result;
use myflix_models::User;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
struct SessionData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// On-disk session persistence: the bearer token, the user id, and the
/// serialized user object, as simple string entries in a TOML file.
///
/// There is no expiry handling here. A stored token is trusted until a
/// call to the API rejects it.
pub struct SessionStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let session_data: SessionData = toml::from_str(&content)?;
            self.entries = session_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let session_data = SessionData {
            data: self.entries.clone(),
        };
        let content = toml::to_string_pretty(&session_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Remove the session file and forget all entries.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    // Typed accessors for the three entries the client persists

    pub fn get_token(&self) -> Option<&String> {
        self.get("token")
    }

    pub fn set_token(&mut self, token: String) {
        self.set("token".to_string(), token);
    }

    pub fn get_user_id(&self) -> Option<&String> {
        self.get("user_id")
    }

    pub fn set_user_id(&mut self, user_id: String) {
        self.set("user_id".to_string(), user_id);
    }

    pub fn get_user(&self) -> Option<User> {
        self.get("user")
            .and_then(|json| serde_json::from_str(json).ok())
    }

    pub fn set_user(&mut self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.set("user".to_string(), json);
        Ok(())
    }

    pub fn has_session(&self) -> bool {
        self.get_token().is_some() && self.get_user_id().is_some()
    }
}
