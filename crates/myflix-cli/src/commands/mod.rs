pub mod clear;
pub mod favourites;
pub mod movies;
pub mod profile;
pub mod prompts;
pub mod session;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use myflix_api::ApiClient;
use myflix_config::{Config, PathManager, SessionStore};
use myflix_core::Session;

/// Everything a logged-in command needs: the session context, a client
/// carrying its token, and the store for persisting session changes.
pub struct ClientContext {
    pub session: Session,
    pub client: ApiClient,
    pub store: SessionStore,
}

pub fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file).map_err(|e| {
        eyre!(
            "Failed to load config from {}: {}",
            config_file.display(),
            e
        )
    })?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;
    Ok(config)
}

pub fn load_session_store(path_manager: &PathManager) -> Result<SessionStore> {
    let session_file = path_manager.session_file();
    let mut store = SessionStore::new(session_file.clone());
    store.load().map_err(|e| {
        eyre!(
            "Failed to load session from {}: {}",
            session_file.display(),
            e
        )
    })?;
    Ok(store)
}

/// Load the stored session and build a client around it, or fail with a
/// hint to log in. The session object is the single source of truth;
/// commands mutate it and persist through the returned store.
pub fn require_session(path_manager: &PathManager) -> Result<ClientContext> {
    let config = load_config(path_manager)?;
    let store = load_session_store(path_manager)?;

    let session = Session::load(&store)
        .ok_or_else(|| eyre!("Not logged in. Run 'myflix login' first."))?;

    let client = ApiClient::new(config.api.base_url)
        .with_session(session.token().to_string(), session.user_id().to_string());

    Ok(ClientContext {
        session,
        client,
        store,
    })
}
