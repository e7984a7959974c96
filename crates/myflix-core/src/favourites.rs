use crate::session::Session;
use anyhow::{Context, Result};
use myflix_api::MovieService;
use myflix_models::{Movie, User};
use tracing::{debug, info};

/// What a reconciliation call actually did, so the UI can word its
/// notification accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Added,
    Removed,
    /// The request was a no-op (adding an id already present, or
    /// removing one that was absent); no network call was made.
    Unchanged,
}

/// Keeps "is this movie a favourite" correct across add/remove actions.
///
/// Membership is answered from the session's cached favourites list. A
/// mutation goes to the server first; only on success is the cached user
/// replaced (from the response, or a profile re-fetch when the endpoint
/// returns no body). On failure the cache is left exactly as it was -
/// there is no optimistic update to roll back, and no automatic retry.
///
/// The reconciler borrows the session mutably, so the borrow checker
/// rules out overlapping toggles on the same session within a process.
pub struct FavouritesReconciler<'a, S: MovieService> {
    session: &'a mut Session,
    service: &'a S,
}

impl<'a, S: MovieService> FavouritesReconciler<'a, S> {
    pub fn new(session: &'a mut Session, service: &'a S) -> Self {
        Self { session, service }
    }

    /// True iff the movie id is in the cached favourites list. An empty
    /// list simply answers false.
    pub fn is_favourite(&self, movie_id: &str) -> bool {
        self.session.user().has_favourite(movie_id)
    }

    /// Add or remove depending on current membership.
    pub async fn toggle_favourite(&mut self, movie: &Movie) -> Result<ToggleAction> {
        if self.is_favourite(&movie.id) {
            self.remove_favourite(&movie.id).await
        } else {
            self.add_favourite(&movie.id).await
        }
    }

    pub async fn add_favourite(&mut self, movie_id: &str) -> Result<ToggleAction> {
        if self.is_favourite(movie_id) {
            debug!("Movie {} already favourited, skipping add", movie_id);
            return Ok(ToggleAction::Unchanged);
        }

        let updated = self
            .service
            .add_favourite(movie_id)
            .await
            .map_err(anyhow::Error::new)
            .context("Failed to add favourite")?;
        self.refresh_from(updated).await?;

        info!("Added movie {} to favourites", movie_id);
        Ok(ToggleAction::Added)
    }

    pub async fn remove_favourite(&mut self, movie_id: &str) -> Result<ToggleAction> {
        if !self.is_favourite(movie_id) {
            debug!("Movie {} not in favourites, skipping remove", movie_id);
            return Ok(ToggleAction::Unchanged);
        }

        let updated = self
            .service
            .remove_favourite(movie_id)
            .await
            .map_err(anyhow::Error::new)
            .context("Failed to remove favourite")?;
        self.refresh_from(updated).await?;

        info!("Removed movie {} from favourites", movie_id);
        Ok(ToggleAction::Removed)
    }

    /// Bring the cached user in line with the server after a successful
    /// mutation, so the next `is_favourite` answer is already correct.
    async fn refresh_from(&mut self, updated: Option<User>) -> Result<()> {
        let user = match updated {
            Some(user) => user,
            None => self
                .service
                .get_profile()
                .await
                .map_err(anyhow::Error::new)
                .context("Failed to refresh profile after favourites change")?,
        };
        self.session.set_user(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
