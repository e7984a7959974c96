use super::{load_config, load_session_store, prompts};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use myflix_api::{ApiClient, ApiError};
use myflix_config::PathManager;
use myflix_core::Session;
use myflix_models::NewUser;
use tracing::debug;

pub async fn run_register(
    username: Option<String>,
    email: Option<String>,
    birthday: Option<String>,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let config = load_config(&path_manager)?;

    let username = match username {
        Some(u) => u,
        None => prompts::prompt_string("Username", None)?,
    };
    let password = prompts::prompt_new_password("Password")?;
    let email = match email {
        Some(e) => e,
        None => prompts::prompt_string("Email", None)?,
    };
    let birthday = match birthday {
        Some(b) => Some(b),
        None => {
            let entered = prompts::prompt_string("Birthday (YYYY-MM-DD, optional)", Some(""))?;
            if entered.is_empty() { None } else { Some(entered) }
        }
    };

    let details = NewUser {
        username,
        password,
        email,
        birthday,
    };

    let client = ApiClient::new(config.api.base_url);
    match client.register(&details).await {
        Ok(user) => {
            output.success(format!(
                "User {} registered. Run 'myflix login' to sign in.",
                user.username
            ));
            Ok(())
        }
        Err(ApiError::Validation { message, .. }) => {
            output.error(format!("Registration rejected: {}", message));
            Err(eyre!("registration failed"))
        }
        Err(e) => {
            debug!("Registration failed: {}", e);
            output.error("Registration failed. Please try again later.");
            Err(eyre!("registration failed"))
        }
    }
}

pub async fn run_login(username: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let config = load_config(&path_manager)?;

    let username = match username {
        Some(u) => u,
        None => prompts::prompt_string("Username", None)?,
    };
    let password = prompts::prompt_password("Password")?;

    let mut client = ApiClient::new(config.api.base_url);
    let login = match client.login(&username, &password).await {
        Ok(login) => login,
        Err(e) => {
            debug!("Login failed: {}", e);
            output.error("Login unsuccessful. Please check your username and password.");
            return Err(eyre!("login failed"));
        }
    };

    let session = Session::from_login(login);
    let mut store = load_session_store(&path_manager)?;
    session
        .persist(&mut store)
        .map_err(|e| eyre!("Failed to store session: {}", e))?;

    output.success(format!("Logged in as {}", session.user().username));
    Ok(())
}

pub fn run_logout(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let mut store = load_session_store(&path_manager)?;

    if !store.has_session() {
        output.info("No stored session to clear");
        return Ok(());
    }

    store
        .clear()
        .map_err(|e| eyre!("Failed to clear session: {}", e))?;
    output.success("Logged out");
    Ok(())
}
