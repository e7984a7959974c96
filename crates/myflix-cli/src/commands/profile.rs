use super::{prompts, require_session};
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use myflix_api::MovieService;
use myflix_config::PathManager;
use myflix_models::UserUpdate;
use tracing::debug;

pub async fn run_show(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let mut ctx = require_session(&path_manager)?;

    // Serve the freshest copy we can get; fall back to the stored session
    // when the API is unreachable.
    match ctx.client.get_profile().await {
        Ok(user) => {
            ctx.session.set_user(user);
            ctx.session
                .persist(&mut ctx.store)
                .map_err(|e| eyre!("Failed to store session: {}", e))?;
        }
        Err(e) => {
            debug!("Profile fetch failed, showing stored session: {}", e);
            output.warn("Could not reach the API; showing the stored profile");
        }
    }

    let user = ctx.session.user();
    match output.format() {
        OutputFormat::Human => {
            output.println(format!("Username:   {}", user.username));
            output.println(format!("Email:      {}", user.email));
            if let Some(birthday) = user.birthday {
                output.println(format!("Birthday:   {}", birthday.format("%Y-%m-%d")));
            }
            output.println(format!("Favourites: {}", user.favourite_movies.len()));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(user)?);
        }
    }
    Ok(())
}

pub async fn run_edit(
    username: Option<String>,
    password: bool,
    email: Option<String>,
    birthday: Option<String>,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let mut ctx = require_session(&path_manager)?;

    let flags_given = username.is_some() || password || email.is_some() || birthday.is_some();

    let update = if flags_given {
        let password = if password {
            Some(prompts::prompt_new_password("New password")?)
        } else {
            None
        };
        UserUpdate {
            username,
            password,
            email,
            birthday,
        }
    } else {
        prompt_update(&ctx)?
    };

    if update.is_empty() {
        output.info("Nothing to update");
        return Ok(());
    }

    let user = ctx
        .client
        .update_profile(&update)
        .await
        .map_err(|e| eyre!("Failed to update profile: {}", e))?;
    ctx.session.set_user(user);
    ctx.session
        .persist(&mut ctx.store)
        .map_err(|e| eyre!("Failed to store session: {}", e))?;

    output.success("Profile updated");
    Ok(())
}

/// Walk through each field interactively, offering the current value as
/// the default. Leaving the password blank keeps the existing one.
fn prompt_update(ctx: &super::ClientContext) -> Result<UserUpdate> {
    let current = ctx.session.user();

    let username = prompts::prompt_string("Username", Some(&current.username))?;
    let email = prompts::prompt_string("Email", Some(&current.email))?;
    let current_birthday = current
        .birthday
        .map(|b| b.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let birthday = prompts::prompt_string("Birthday (YYYY-MM-DD)", Some(&current_birthday))?;
    let new_password = prompts::prompt_yes_no("Change password?", Some(false))?;
    let password = if new_password {
        Some(prompts::prompt_new_password("New password")?)
    } else {
        None
    };

    Ok(UserUpdate {
        username: (username != current.username).then_some(username),
        password,
        email: (email != current.email).then_some(email),
        birthday: (!birthday.is_empty() && birthday != current_birthday).then_some(birthday),
    })
}

pub async fn run_delete(yes: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let mut ctx = require_session(&path_manager)?;

    if !yes {
        let confirmed = prompts::prompt_yes_no(
            &format!(
                "Permanently delete the account '{}'? This cannot be undone",
                ctx.session.user().username
            ),
            Some(false),
        )?;
        if !confirmed {
            output.info("Aborted");
            return Ok(());
        }
    }

    ctx.client
        .delete_account()
        .await
        .map_err(|e| eyre!("Failed to delete account: {}", e))?;
    ctx.store
        .clear()
        .map_err(|e| eyre!("Failed to clear session: {}", e))?;

    output.success("Account deleted and session cleared");
    Ok(())
}
