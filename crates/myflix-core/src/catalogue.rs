use anyhow::{anyhow, Result};
use myflix_config::PathManager;
use myflix_models::{Genre, Movie};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Disk-backed cache of the last-fetched catalogue (movies and genres).
///
/// A corrupt cache file is deleted and treated as a miss, never an error;
/// the worst case after a failed refresh is stale data staying visible
/// until the next successful fetch.
#[derive(Clone)]
pub struct CatalogueCache {
    cache_dir: PathBuf,
}

impl CatalogueCache {
    pub fn new(path_manager: &PathManager) -> Result<Self> {
        Self::with_dir(path_manager.catalogue_cache_dir())
    }

    pub fn with_dir(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, data_type: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", data_type))
    }

    pub fn load_movies(&self) -> Result<Option<Vec<Movie>>> {
        self.load_data("movies")
    }

    pub fn save_movies(&self, movies: &[Movie]) -> Result<()> {
        self.save_data("movies", movies)
    }

    pub fn load_genres(&self) -> Result<Option<Vec<Genre>>> {
        self.load_data("genres")
    }

    pub fn save_genres(&self, genres: &[Genre]) -> Result<()> {
        self.save_data("genres", genres)
    }

    fn load_data<T>(&self, data_type: &str) -> Result<Option<Vec<T>>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let cache_path = self.cache_path(data_type);

        if !cache_path.exists() {
            debug!("Cache miss: {} (file does not exist)", data_type);
            return Ok(None);
        }

        match std::fs::read_to_string(&cache_path) {
            Ok(content) => match serde_json::from_str::<Vec<T>>(&content) {
                Ok(data) => {
                    info!("Cache hit: {} (loaded {} items)", data_type, data.len());
                    Ok(Some(data))
                }
                Err(e) => {
                    warn!(
                        "Cache corruption detected for {}: {}. Deleting corrupted file.",
                        data_type, e
                    );
                    if let Err(rm_err) = std::fs::remove_file(&cache_path) {
                        warn!("Failed to delete corrupted cache file: {}", rm_err);
                    }
                    Ok(None)
                }
            },
            Err(e) => {
                warn!("Failed to read cache file for {}: {}", data_type, e);
                Ok(None)
            }
        }
    }

    fn save_data<T>(&self, data_type: &str, data: &[T]) -> Result<()>
    where
        T: Serialize,
    {
        let cache_path = self.cache_path(data_type);

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| anyhow!("Failed to serialize cache: {}", e))?;
        std::fs::write(&cache_path, json)
            .map_err(|e| anyhow!("Failed to write cache: {}", e))?;
        debug!("Cache saved: {} ({} items)", data_type, data.len());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            std::fs::remove_dir_all(&self.cache_dir)?;
            std::fs::create_dir_all(&self.cache_dir)?;
            info!("Cleared catalogue cache directory: {:?}", self.cache_dir);
        }
        Ok(())
    }
}

/// Find a movie by its database id.
pub fn find_by_id<'a>(movies: &'a [Movie], movie_id: &str) -> Option<&'a Movie> {
    movies.iter().find(|m| m.id == movie_id)
}

/// Find a movie by title, case-insensitively.
pub fn find_by_title<'a>(movies: &'a [Movie], title: &str) -> Option<&'a Movie> {
    movies
        .iter()
        .find(|m| m.title.eq_ignore_ascii_case(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use myflix_models::Director;

    fn cache_in(dir: &std::path::Path) -> CatalogueCache {
        CatalogueCache::with_dir(dir.join("catalogue")).unwrap()
    }

    fn sample_movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            description: "A film.".to_string(),
            image_path: None,
            genre: Genre {
                name: "Drama".to_string(),
                description: "Serious stories.".to_string(),
            },
            director: Director {
                name: "Jane Doe".to_string(),
                bio: "Directs films.".to_string(),
                birth: None,
                death: None,
            },
            featured: false,
        }
    }

    #[test]
    fn test_save_and_load_movies() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());

        assert!(cache.load_movies().unwrap().is_none());

        let movies = vec![sample_movie("m1", "Heat"), sample_movie("m2", "Ronin")];
        cache.save_movies(&movies).unwrap();

        let loaded = cache.load_movies().unwrap().unwrap();
        assert_eq!(loaded, movies);
    }

    #[test]
    fn test_corrupt_cache_is_a_miss_and_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());

        let path = cache.cache_path("movies");
        std::fs::write(&path, "{not valid json").unwrap();

        assert!(cache.load_movies().unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_clear_empties_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());

        cache.save_movies(&[sample_movie("m1", "Heat")]).unwrap();
        cache.clear().unwrap();
        assert!(cache.load_movies().unwrap().is_none());
    }

    #[test]
    fn test_title_lookup_is_case_insensitive() {
        let movies = vec![sample_movie("m1", "Heat"), sample_movie("m2", "Ronin")];
        assert_eq!(find_by_title(&movies, "heat").map(|m| m.id.as_str()), Some("m1"));
        assert_eq!(find_by_id(&movies, "m2").map(|m| m.title.as_str()), Some("Ronin"));
        assert!(find_by_title(&movies, "Alien").is_none());
    }
}
