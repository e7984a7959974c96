use super::*;
use async_trait::async_trait;
use myflix_api::ApiError;
use myflix_models::{Director, Genre, LoginResponse, UserUpdate};
use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory stand-in for the remote API: one user record, mutated by the
/// favourites endpoints the way the real server mutates its copy.
struct FakeService {
    user: Mutex<User>,
    fail_mutations: AtomicBool,
    /// Whether mutation responses carry the updated user (the documented
    /// behaviour) or an empty body (some deployments).
    return_updated_user: bool,
    /// Simulate a server that duplicates an id on add.
    duplicate_on_add: bool,
    mutation_calls: AtomicUsize,
    profile_fetches: AtomicUsize,
}

impl FakeService {
    fn with_favourites(ids: &[&str]) -> Self {
        Self {
            user: Mutex::new(user_with_favourites(ids)),
            fail_mutations: AtomicBool::new(false),
            return_updated_user: true,
            duplicate_on_add: false,
            mutation_calls: AtomicUsize::new(0),
            profile_fetches: AtomicUsize::new(0),
        }
    }

    fn failing(ids: &[&str]) -> Self {
        let service = Self::with_favourites(ids);
        service.fail_mutations.store(true, Ordering::SeqCst);
        service
    }

    fn server_error() -> ApiError {
        ApiError::from_status(StatusCode::BAD_GATEWAY, "simulated failure".to_string())
    }

    fn respond(&self) -> Option<User> {
        if self.return_updated_user {
            Some(self.user.lock().unwrap().clone())
        } else {
            None
        }
    }
}

fn user_with_favourites(ids: &[&str]) -> User {
    User {
        id: "u1".to_string(),
        username: "alice".to_string(),
        email: "alice@example.org".to_string(),
        birthday: None,
        favourite_movies: ids.iter().map(|s| s.to_string()).collect(),
    }
}

fn session_with_favourites(ids: &[&str]) -> Session {
    Session::from_login(LoginResponse {
        user: user_with_favourites(ids),
        token: "jwt".to_string(),
    })
}

fn movie(id: &str) -> Movie {
    Movie {
        id: id.to_string(),
        title: format!("Movie {}", id),
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

#[async_trait]
impl MovieService for FakeService {
    type Error = ApiError;

    async fn get_movies(&self) -> Result<Vec<Movie>, ApiError> {
        Ok(Vec::new())
    }

    async fn get_movie(&self, title: &str) -> Result<Movie, ApiError> {
        Err(ApiError::from_status(
            StatusCode::NOT_FOUND,
            format!("no such movie: {}", title),
        ))
    }

    async fn get_genres(&self) -> Result<Vec<Genre>, ApiError> {
        Ok(Vec::new())
    }

    async fn get_director(&self, name: &str) -> Result<Director, ApiError> {
        Err(ApiError::from_status(
            StatusCode::NOT_FOUND,
            format!("no such director: {}", name),
        ))
    }

    async fn get_profile(&self) -> Result<User, ApiError> {
        self.profile_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.user.lock().unwrap().clone())
    }

    async fn add_favourite(&self, movie_id: &str) -> Result<Option<User>, ApiError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }
        {
            let mut user = self.user.lock().unwrap();
            user.favourite_movies.push(movie_id.to_string());
            if self.duplicate_on_add {
                user.favourite_movies.push(movie_id.to_string());
            }
        }
        Ok(self.respond())
    }

    async fn remove_favourite(&self, movie_id: &str) -> Result<Option<User>, ApiError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }
        {
            let mut user = self.user.lock().unwrap();
            user.favourite_movies.retain(|id| id != movie_id);
        }
        Ok(self.respond())
    }

    async fn update_profile(&self, _update: &UserUpdate) -> Result<User, ApiError> {
        Ok(self.user.lock().unwrap().clone())
    }

    async fn delete_account(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_is_favourite_false_on_empty_list() {
    let mut session = session_with_favourites(&[]);
    let service = FakeService::with_favourites(&[]);
    let reconciler = FavouritesReconciler::new(&mut session, &service);

    assert!(!reconciler.is_favourite("m1"));
}

#[tokio::test]
async fn test_toggle_adds_when_not_favourited() {
    let mut session = session_with_favourites(&["m1", "m2"]);
    let service = FakeService::with_favourites(&["m1", "m2"]);
    let mut reconciler = FavouritesReconciler::new(&mut session, &service);

    assert!(!reconciler.is_favourite("m3"));
    let action = reconciler.toggle_favourite(&movie("m3")).await.unwrap();
    assert_eq!(action, ToggleAction::Added);
    assert!(reconciler.is_favourite("m3"));

    // Three entries, no duplicates
    assert_eq!(session.favourites(), ["m1", "m2", "m3"]);
}

#[tokio::test]
async fn test_toggle_removes_when_favourited() {
    let mut session = session_with_favourites(&["m1", "m2"]);
    let service = FakeService::with_favourites(&["m1", "m2"]);
    let mut reconciler = FavouritesReconciler::new(&mut session, &service);

    let action = reconciler.toggle_favourite(&movie("m1")).await.unwrap();
    assert_eq!(action, ToggleAction::Removed);
    assert!(!reconciler.is_favourite("m1"));
    assert_eq!(session.favourites(), ["m2"]);
}

#[tokio::test]
async fn test_failed_mutation_leaves_favourites_unchanged() {
    let mut session = session_with_favourites(&["m1"]);
    let service = FakeService::failing(&["m1"]);
    let mut reconciler = FavouritesReconciler::new(&mut session, &service);

    assert!(reconciler.toggle_favourite(&movie("m2")).await.is_err());
    assert!(!reconciler.is_favourite("m2"));

    assert!(reconciler.toggle_favourite(&movie("m1")).await.is_err());
    assert!(reconciler.is_favourite("m1"));

    assert_eq!(session.favourites(), ["m1"]);
}

#[tokio::test]
async fn test_toggle_twice_restores_original_state() {
    let mut session = session_with_favourites(&["m1"]);
    let service = FakeService::with_favourites(&["m1"]);
    let mut reconciler = FavouritesReconciler::new(&mut session, &service);

    reconciler.toggle_favourite(&movie("m2")).await.unwrap();
    assert!(reconciler.is_favourite("m2"));
    reconciler.toggle_favourite(&movie("m2")).await.unwrap();
    assert!(!reconciler.is_favourite("m2"));

    assert_eq!(session.favourites(), ["m1"]);
}

#[tokio::test]
async fn test_add_already_present_is_noop_without_network() {
    let mut session = session_with_favourites(&["m1"]);
    let service = FakeService::with_favourites(&["m1"]);
    let mut reconciler = FavouritesReconciler::new(&mut session, &service);

    let action = reconciler.add_favourite("m1").await.unwrap();
    assert_eq!(action, ToggleAction::Unchanged);
    assert_eq!(service.mutation_calls.load(Ordering::SeqCst), 0);
    assert_eq!(session.favourites(), ["m1"]);
}

#[tokio::test]
async fn test_remove_absent_is_noop_without_network() {
    let mut session = session_with_favourites(&[]);
    let service = FakeService::with_favourites(&[]);
    let mut reconciler = FavouritesReconciler::new(&mut session, &service);

    let action = reconciler.remove_favourite("m9").await.unwrap();
    assert_eq!(action, ToggleAction::Unchanged);
    assert_eq!(service.mutation_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_mutation_response_falls_back_to_profile_fetch() {
    let mut session = session_with_favourites(&[]);
    let mut service = FakeService::with_favourites(&[]);
    service.return_updated_user = false;
    let mut reconciler = FavouritesReconciler::new(&mut session, &service);

    let action = reconciler.add_favourite("m1").await.unwrap();
    assert_eq!(action, ToggleAction::Added);
    assert_eq!(service.profile_fetches.load(Ordering::SeqCst), 1);
    assert!(session.user().has_favourite("m1"));
}

#[tokio::test]
async fn test_duplicating_server_response_is_deduplicated() {
    let mut session = session_with_favourites(&[]);
    let mut service = FakeService::with_favourites(&[]);
    service.duplicate_on_add = true;
    let mut reconciler = FavouritesReconciler::new(&mut session, &service);

    reconciler.add_favourite("m1").await.unwrap();
    assert_eq!(session.favourites(), ["m1"]);
}
