use async_trait::async_trait;
use myflix_models::{Director, Genre, Movie, User, UserUpdate};

/// The seam between the core components and the HTTP transport.
///
/// `ApiClient` is the production implementation; tests substitute an
/// in-memory fake so the favourites reconciliation logic can be exercised
/// without a network.
#[async_trait]
pub trait MovieService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    // Catalogue (read-only)
    async fn get_movies(&self) -> Result<Vec<Movie>, Self::Error>;
    async fn get_movie(&self, title: &str) -> Result<Movie, Self::Error>;
    async fn get_genres(&self) -> Result<Vec<Genre>, Self::Error>;
    async fn get_director(&self, name: &str) -> Result<Director, Self::Error>;

    // Profile and favourites
    async fn get_profile(&self) -> Result<User, Self::Error>;

    /// Returns the updated user when the server includes one in the
    /// response, `None` when the caller must re-fetch the profile.
    async fn add_favourite(&self, movie_id: &str) -> Result<Option<User>, Self::Error>;
    async fn remove_favourite(&self, movie_id: &str) -> Result<Option<User>, Self::Error>;

    async fn update_profile(&self, update: &UserUpdate) -> Result<User, Self::Error>;
    async fn delete_account(&self) -> Result<(), Self::Error>;
}
