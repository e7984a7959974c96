use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record as returned by the myFlix API.
///
/// `favourite_movies` holds movie ids, not full movie objects. The API
/// omits the field for freshly created accounts, so it defaults to empty
/// rather than failing to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime<Utc>>,
    #[serde(rename = "FavoriteMovies", default)]
    pub favourite_movies: Vec<String>,
}

impl User {
    pub fn has_favourite(&self, movie_id: &str) -> bool {
        self.favourite_movies.iter().any(|id| id == movie_id)
    }
}

/// Registration payload for POST /users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

/// Partial update payload for PUT /users/:id. Only the fields that are
/// set are sent, so an edit never clobbers values the user left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(rename = "Username", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "Password", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.birthday.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Response to POST /login: the bearer token plus the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_wire_format() {
        let json = r#"{
            "_id": "61a1",
            "Username": "alice",
            "Email": "alice@example.org",
            "Birthday": "1990-05-01T00:00:00.000Z",
            "FavoriteMovies": ["m1", "m2"]
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "61a1");
        assert_eq!(user.username, "alice");
        assert!(user.has_favourite("m1"));
        assert!(!user.has_favourite("m3"));
    }

    #[test]
    fn test_missing_favourites_list_is_empty_not_an_error() {
        let json = r#"{"_id": "61a1", "Username": "bob", "Email": "bob@example.org"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.favourite_movies.is_empty());
        assert!(!user.has_favourite("m1"));
    }

    #[test]
    fn test_user_update_skips_unset_fields() {
        let update = UserUpdate {
            email: Some("new@example.org".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "Email": "new@example.org" }));
        assert!(!update.is_empty());
        assert!(UserUpdate::default().is_empty());
    }

    #[test]
    fn test_login_response_round_trip() {
        let json = r#"{
            "user": {"_id": "61a1", "Username": "alice", "Email": "a@example.org", "FavoriteMovies": []},
            "token": "jwt.token.value"
        }"#;
        let login: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(login.token, "jwt.token.value");
        assert_eq!(login.user.username, "alice");
    }
}
