use super::movies::{load_catalogue, resolve_movie};
use super::require_session;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use myflix_config::PathManager;
use myflix_core::{find_by_id, CatalogueCache, FavouritesReconciler, ToggleAction};
use serde_json::json;

pub async fn run_list(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let ctx = require_session(&path_manager)?;
    let cache = CatalogueCache::new(&path_manager).map_err(|e| eyre!("{}", e))?;

    let favourite_ids: Vec<String> = ctx.session.favourites().to_vec();
    if favourite_ids.is_empty() {
        output.info("You have no favourite movies yet");
        return Ok(());
    }

    // Titles come from the catalogue; ids with no cached movie are shown raw
    let movies = load_catalogue(&ctx, &cache, false, output).await?;

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["Title", "Genre", "Director"]);

            for id in &favourite_ids {
                match find_by_id(&movies, id) {
                    Some(movie) => {
                        table.add_row(vec![
                            Cell::new(&movie.title),
                            Cell::new(&movie.genre.name),
                            Cell::new(&movie.director.name),
                        ]);
                    }
                    None => {
                        table.add_row(vec![Cell::new(id), Cell::new(""), Cell::new("")]);
                    }
                }
            }

            output.println(table.to_string());
            output.info(format!("{} favourites", favourite_ids.len()));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let entries: Vec<serde_json::Value> = favourite_ids
                .iter()
                .map(|id| match find_by_id(&movies, id) {
                    Some(movie) => json!({
                        "id": id,
                        "title": movie.title,
                        "genre": movie.genre.name,
                        "director": movie.director.name,
                    }),
                    None => json!({ "id": id }),
                })
                .collect();
            output.json(&serde_json::Value::Array(entries));
        }
    }

    Ok(())
}

pub async fn run_add(title: &str, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let mut ctx = require_session(&path_manager)?;
    let cache = CatalogueCache::new(&path_manager).map_err(|e| eyre!("{}", e))?;

    let movie = resolve_movie(&ctx, &cache, title, output).await?;

    let mut reconciler = FavouritesReconciler::new(&mut ctx.session, &ctx.client);
    let action = reconciler
        .add_favourite(&movie.id)
        .await
        .map_err(|e| eyre!("{}", e))?;
    ctx.session
        .persist(&mut ctx.store)
        .map_err(|e| eyre!("Failed to store session: {}", e))?;

    match action {
        ToggleAction::Added => {
            output.success(format!("{} has been added to your favourites!", movie.title));
        }
        _ => {
            output.info(format!("{} is already in your favourites", movie.title));
        }
    }
    Ok(())
}

pub async fn run_remove(title: &str, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let mut ctx = require_session(&path_manager)?;
    let cache = CatalogueCache::new(&path_manager).map_err(|e| eyre!("{}", e))?;

    let movie = resolve_movie(&ctx, &cache, title, output).await?;

    let mut reconciler = FavouritesReconciler::new(&mut ctx.session, &ctx.client);
    let action = reconciler
        .remove_favourite(&movie.id)
        .await
        .map_err(|e| eyre!("{}", e))?;
    ctx.session
        .persist(&mut ctx.store)
        .map_err(|e| eyre!("Failed to store session: {}", e))?;

    match action {
        ToggleAction::Removed => {
            output.success(format!(
                "{} has been removed from your favourites.",
                movie.title
            ));
        }
        _ => {
            output.info(format!("{} is not in your favourites", movie.title));
        }
    }
    Ok(())
}

pub async fn run_toggle(title: &str, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let mut ctx = require_session(&path_manager)?;
    let cache = CatalogueCache::new(&path_manager).map_err(|e| eyre!("{}", e))?;

    let movie = resolve_movie(&ctx, &cache, title, output).await?;

    let mut reconciler = FavouritesReconciler::new(&mut ctx.session, &ctx.client);
    let action = reconciler
        .toggle_favourite(&movie)
        .await
        .map_err(|e| eyre!("{}", e))?;
    ctx.session
        .persist(&mut ctx.store)
        .map_err(|e| eyre!("Failed to store session: {}", e))?;

    match action {
        ToggleAction::Added => {
            output.success(format!("{} has been added to your favourites!", movie.title));
        }
        ToggleAction::Removed => {
            output.success(format!(
                "{} has been removed from your favourites.",
                movie.title
            ));
        }
        ToggleAction::Unchanged => {
            output.info(format!("No change to {}", movie.title));
        }
    }
    Ok(())
}
