use super::{require_session, ClientContext};
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use myflix_api::{ApiError, MovieService};
use myflix_config::PathManager;
use myflix_core::{find_by_title, CatalogueCache};
use myflix_models::Movie;
use std::io::IsTerminal;
use std::time::Duration;
use tracing::debug;

/// Load the catalogue, serving from the cache unless `refresh` is set or
/// the cache misses. A successful fetch replaces the cached copy.
pub(super) async fn load_catalogue(
    ctx: &ClientContext,
    cache: &CatalogueCache,
    refresh: bool,
    output: &Output,
) -> Result<Vec<Movie>> {
    if !refresh {
        if let Some(movies) = cache.load_movies().map_err(|e| eyre!("{}", e))? {
            return Ok(movies);
        }
        debug!("Catalogue cache miss, fetching from API");
    }

    let spinner = start_spinner(output, "Fetching movie catalogue...");
    let result = ctx.client.get_movies().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let movies = result.map_err(|e| {
        if e.is_auth_failure() {
            eyre!("The API rejected the stored session. Run 'myflix login' again.")
        } else {
            eyre!("Failed to fetch movies: {}", e)
        }
    })?;
    if let Err(e) = cache.save_movies(&movies) {
        debug!("Failed to write catalogue cache: {}", e);
    }
    Ok(movies)
}

pub async fn run_list(refresh: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let ctx = require_session(&path_manager)?;
    let cache = CatalogueCache::new(&path_manager).map_err(|e| eyre!("{}", e))?;

    let movies = load_catalogue(&ctx, &cache, refresh, output).await?;

    match output.format() {
        OutputFormat::Human => {
            if movies.is_empty() {
                output.info("The catalogue is empty");
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["Title", "Genre", "Director", "Favourite"]);

            for movie in &movies {
                let favourite = if ctx.session.user().has_favourite(&movie.id) {
                    "★"
                } else {
                    ""
                };
                table.add_row(vec![
                    Cell::new(&movie.title),
                    Cell::new(&movie.genre.name),
                    Cell::new(&movie.director.name),
                    Cell::new(favourite),
                ]);
            }

            output.println(table.to_string());
            output.info(format!("{} movies", movies.len()));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&movies)?);
        }
    }

    Ok(())
}

pub async fn run_show(title: &str, refresh: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let ctx = require_session(&path_manager)?;
    let cache = CatalogueCache::new(&path_manager).map_err(|e| eyre!("{}", e))?;

    // Cached catalogue first; a miss falls back to the single-movie
    // endpoint, which matches the title exactly.
    let movies = load_catalogue(&ctx, &cache, refresh, output).await?;
    let movie = match find_by_title(&movies, title) {
        Some(movie) => movie.clone(),
        None => ctx.client.get_movie(title).await.map_err(|e| match e {
            ApiError::Validation { .. } | ApiError::Api { .. } => {
                eyre!("No movie titled '{}' in the catalogue", title)
            }
            other => eyre!("Failed to fetch movie: {}", other),
        })?,
    };

    match output.format() {
        OutputFormat::Human => {
            output.println(format!("{}", movie.title));
            output.println(format!("  {}", movie.description));
            output.println("");
            output.println(format!(
                "  Genre: {} - {}",
                movie.genre.name, movie.genre.description
            ));
            output.println("");
            output.println(format!("  Director: {}", movie.director.name));
            if let Some(birth) = movie.director.birth {
                match movie.director.death {
                    Some(death) => output.println(format!(
                        "    ({} - {})",
                        birth.format("%Y-%m-%d"),
                        death.format("%Y-%m-%d")
                    )),
                    None => output.println(format!("    (born {})", birth.format("%Y-%m-%d"))),
                }
            }
            output.println(format!("    {}", movie.director.bio));
            if let Some(image_path) = &movie.image_path {
                output.println("");
                output.println(format!("  Poster: {}", image_path));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&movie)?);
        }
    }

    Ok(())
}

pub async fn run_director(name: &str, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let ctx = require_session(&path_manager)?;

    let spinner = start_spinner(output, "Fetching director...");
    let result = ctx.client.get_director(name).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let director = result.map_err(|e| match e {
        ApiError::Validation { .. } | ApiError::Api { .. } => {
            eyre!("No director named '{}' in the catalogue", name)
        }
        other => eyre!("Failed to fetch director: {}", other),
    })?;

    match output.format() {
        OutputFormat::Human => {
            output.println(&director.name);
            if let Some(birth) = director.birth {
                match director.death {
                    Some(death) => output.println(format!(
                        "  ({} - {})",
                        birth.format("%Y-%m-%d"),
                        death.format("%Y-%m-%d")
                    )),
                    None => output.println(format!("  (born {})", birth.format("%Y-%m-%d"))),
                }
            }
            output.println(format!("  {}", director.bio));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&director)?);
        }
    }

    Ok(())
}

pub async fn run_genres(refresh: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
    let ctx = require_session(&path_manager)?;
    let cache = CatalogueCache::new(&path_manager).map_err(|e| eyre!("{}", e))?;

    let cached = if refresh {
        None
    } else {
        cache.load_genres().map_err(|e| eyre!("{}", e))?
    };

    let genres = match cached {
        Some(genres) => genres,
        None => {
            let spinner = start_spinner(output, "Fetching genres...");
            let result = ctx.client.get_genres().await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let genres = result.map_err(|e| eyre!("Failed to fetch genres: {}", e))?;
            if let Err(e) = cache.save_genres(&genres) {
                debug!("Failed to write genres cache: {}", e);
            }
            genres
        }
    };

    match output.format() {
        OutputFormat::Human => {
            if genres.is_empty() {
                output.info("No genres in the catalogue");
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["Genre", "Description"]);
            for genre in &genres {
                table.add_row(vec![Cell::new(&genre.name), Cell::new(&genre.description)]);
            }
            output.println(table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&genres)?);
        }
    }

    Ok(())
}

/// Resolve a title to a movie, case-insensitively. A miss against a stale
/// cache is retried once against a fresh catalogue before giving up.
pub(super) async fn resolve_movie(
    ctx: &ClientContext,
    cache: &CatalogueCache,
    title: &str,
    output: &Output,
) -> Result<Movie> {
    let movies = load_catalogue(ctx, cache, false, output).await?;
    if let Some(movie) = find_by_title(&movies, title) {
        return Ok(movie.clone());
    }

    debug!("'{}' not in cached catalogue, refreshing", title);
    let movies = load_catalogue(ctx, cache, true, output).await?;
    find_by_title(&movies, title)
        .cloned()
        .ok_or_else(|| eyre!("No movie titled '{}' in the catalogue", title))
}

pub(super) fn start_spinner(output: &Output, message: &str) -> Option<ProgressBar> {
    if output.is_quiet()
        || output.format() != OutputFormat::Human
        || !std::io::stderr().is_terminal()
    {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}
