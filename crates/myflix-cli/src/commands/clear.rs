use super::load_session_store;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use myflix_config::PathManager;
use myflix_core::CatalogueCache;

pub fn run_clear(all: bool, cache: bool, session: bool, output: &Output) -> Result<()> {
    if !all && !cache && !session {
        output.warn("Nothing selected. Use --cache, --session, or --all.");
        output.info("Example: myflix clear --cache");
        return Ok(());
    }

    let path_manager = PathManager::default();

    if all || cache {
        let catalogue_cache = CatalogueCache::new(&path_manager).map_err(|e| eyre!("{}", e))?;
        catalogue_cache.clear().map_err(|e| eyre!("{}", e))?;
        output.success("Catalogue cache cleared");
    }

    if all || session {
        let mut store = load_session_store(&path_manager)?;
        if store.has_session() {
            store
                .clear()
                .map_err(|e| eyre!("Failed to clear session: {}", e))?;
            output.success("Session cleared");
        } else {
            output.info("No stored session to clear");
        }
    }

    Ok(())
}
