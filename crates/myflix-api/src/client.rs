use crate::api;
use crate::auth;
use crate::error::ApiError;
use crate::traits::MovieService;
use async_trait::async_trait;
use myflix_models::{Director, Genre, LoginResponse, Movie, NewUser, User, UserUpdate};
use reqwest::Client;
use std::sync::Arc;

/// HTTP client for the myFlix API.
///
/// Holds the bearer token and user id for the logged-in user; both are
/// attached by `login` or `with_session`. Catalogue and profile calls
/// fail with `ApiError::NotAuthenticated` until a session is present.
#[derive(Clone)]
pub struct ApiClient {
    client: Arc<Client>,
    base_url: String,
    access_token: Option<String>,
    user_id: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Arc::new(auth::create_api_client()),
            base_url: base_url.into(),
            access_token: None,
            user_id: None,
        }
    }

    /// Attach a previously persisted session.
    pub fn with_session(mut self, access_token: String, user_id: String) -> Self {
        self.access_token = Some(access_token);
        self.user_id = Some(user_id);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user_id.is_some()
    }

    fn access_token(&self) -> Result<&str, ApiError> {
        self.access_token.as_deref().ok_or(ApiError::NotAuthenticated)
    }

    fn user_id(&self) -> Result<&str, ApiError> {
        self.user_id.as_deref().ok_or(ApiError::NotAuthenticated)
    }

    /// Register a new account. Does not log the user in; the API expects
    /// a separate login call afterwards.
    pub async fn register(&self, details: &NewUser) -> Result<User, ApiError> {
        auth::register(&self.client, &self.base_url, details).await
    }

    /// Log in and attach the returned token and user id to this client.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let login = auth::login(&self.client, &self.base_url, username, password).await?;
        self.access_token = Some(login.token.clone());
        self.user_id = Some(login.user.id.clone());
        Ok(login)
    }
}

#[async_trait]
impl MovieService for ApiClient {
    type Error = ApiError;

    async fn get_movies(&self) -> Result<Vec<Movie>, ApiError> {
        api::get_movies(&self.client, &self.base_url, self.access_token()?).await
    }

    async fn get_movie(&self, title: &str) -> Result<Movie, ApiError> {
        api::get_movie(&self.client, &self.base_url, self.access_token()?, title).await
    }

    async fn get_genres(&self) -> Result<Vec<Genre>, ApiError> {
        api::get_genres(&self.client, &self.base_url, self.access_token()?).await
    }

    async fn get_director(&self, name: &str) -> Result<Director, ApiError> {
        api::get_director(&self.client, &self.base_url, self.access_token()?, name).await
    }

    async fn get_profile(&self) -> Result<User, ApiError> {
        api::get_user(
            &self.client,
            &self.base_url,
            self.access_token()?,
            self.user_id()?,
        )
        .await
    }

    async fn add_favourite(&self, movie_id: &str) -> Result<Option<User>, ApiError> {
        api::add_favourite(
            &self.client,
            &self.base_url,
            self.access_token()?,
            self.user_id()?,
            movie_id,
        )
        .await
    }

    async fn remove_favourite(&self, movie_id: &str) -> Result<Option<User>, ApiError> {
        api::remove_favourite(
            &self.client,
            &self.base_url,
            self.access_token()?,
            self.user_id()?,
            movie_id,
        )
        .await
    }

    async fn update_profile(&self, update: &UserUpdate) -> Result<User, ApiError> {
        api::update_user(
            &self.client,
            &self.base_url,
            self.access_token()?,
            self.user_id()?,
            update,
        )
        .await
    }

    async fn delete_account(&self) -> Result<(), ApiError> {
        api::delete_user(
            &self.client,
            &self.base_url,
            self.access_token()?,
            self.user_id()?,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unauthenticated_client_rejects_catalogue_calls() {
        let client = ApiClient::new("https://example.org");
        assert!(!client.is_authenticated());

        let err = client.get_movies().await.unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));

        let err = client.get_profile().await.unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
    }

    #[test]
    fn test_with_session_attaches_credentials() {
        let client = ApiClient::new("https://example.org")
            .with_session("token".to_string(), "u1".to_string());
        assert!(client.is_authenticated());
    }
}
