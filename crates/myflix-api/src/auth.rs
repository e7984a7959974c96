use crate::error::ApiError;
use myflix_models::{LoginRequest, LoginResponse, NewUser, User};
use reqwest::Client;
use tracing::info;

/// Create a reqwest Client with a browser-like User-Agent. Some free-tier
/// API hosts sit behind proxies that reject requests with no UA at all.
pub fn create_api_client() -> Client {
    Client::builder()
        .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Register a new account via POST /users. No authentication required.
pub async fn register(client: &Client, base_url: &str, details: &NewUser) -> Result<User, ApiError> {
    let url = format!("{}/users", base_url.trim_end_matches('/'));

    let response = client
        .post(&url)
        .json(details)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    let user: User = response.json().await?;
    info!("Registered user {}", user.username);
    Ok(user)
}

/// Log in via POST /login, returning the bearer token and user record.
pub async fn login(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    let url = format!("{}/login", base_url.trim_end_matches('/'));

    let credentials = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    let response = client
        .post(&url)
        .json(&credentials)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    let login: LoginResponse = response.json().await?;
    info!("Logged in as {}", login.user.username);
    Ok(login)
}
