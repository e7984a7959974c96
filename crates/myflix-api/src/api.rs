use crate::error::ApiError;
use myflix_models::{Director, Genre, Movie, User, UserUpdate};
use reqwest::Client;
use tracing::debug;

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

/// Fetch the full movie catalogue (GET /movies).
pub async fn get_movies(
    client: &Client,
    base_url: &str,
    access_token: &str,
) -> Result<Vec<Movie>, ApiError> {
    let response = client
        .get(endpoint(base_url, "movies"))
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    let movies: Vec<Movie> = response.json().await?;
    debug!("Fetched {} movies from catalogue", movies.len());
    Ok(movies)
}

/// Fetch a single movie by title (GET /movies/:Title).
pub async fn get_movie(
    client: &Client,
    base_url: &str,
    access_token: &str,
    title: &str,
) -> Result<Movie, ApiError> {
    let path = format!("movies/{}", urlencoding::encode(title));

    let response = client
        .get(endpoint(base_url, &path))
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    Ok(response.json().await?)
}

/// Fetch all genres (GET /genres).
pub async fn get_genres(
    client: &Client,
    base_url: &str,
    access_token: &str,
) -> Result<Vec<Genre>, ApiError> {
    let response = client
        .get(endpoint(base_url, "genres"))
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    Ok(response.json().await?)
}

/// Fetch a director by name (GET /movies/director/:Name).
pub async fn get_director(
    client: &Client,
    base_url: &str,
    access_token: &str,
    name: &str,
) -> Result<Director, ApiError> {
    let path = format!("movies/director/{}", urlencoding::encode(name));

    let response = client
        .get(endpoint(base_url, &path))
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    Ok(response.json().await?)
}

/// Fetch a user's profile, including their favourites list (GET /users/:id).
pub async fn get_user(
    client: &Client,
    base_url: &str,
    access_token: &str,
    user_id: &str,
) -> Result<User, ApiError> {
    let path = format!("users/{}", urlencoding::encode(user_id));

    let response = client
        .get(endpoint(base_url, &path))
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    Ok(response.json().await?)
}

/// Add a movie to the user's favourites (POST /users/:id/movies/:movieId).
///
/// The API is documented to respond with the updated user, but some
/// deployments return a plain confirmation string. Returns `None` in that
/// case so the caller can re-fetch the profile instead.
pub async fn add_favourite(
    client: &Client,
    base_url: &str,
    access_token: &str,
    user_id: &str,
    movie_id: &str,
) -> Result<Option<User>, ApiError> {
    let path = format!(
        "users/{}/movies/{}",
        urlencoding::encode(user_id),
        urlencoding::encode(movie_id)
    );

    let response = client
        .post(endpoint(base_url, &path))
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    let body = response.text().await?;
    debug!("Added favourite {} for user {}", movie_id, user_id);
    Ok(serde_json::from_str(&body).ok())
}

/// Remove a movie from the user's favourites (DELETE /users/:id/movies/:movieId).
pub async fn remove_favourite(
    client: &Client,
    base_url: &str,
    access_token: &str,
    user_id: &str,
    movie_id: &str,
) -> Result<Option<User>, ApiError> {
    let path = format!(
        "users/{}/movies/{}",
        urlencoding::encode(user_id),
        urlencoding::encode(movie_id)
    );

    let response = client
        .delete(endpoint(base_url, &path))
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    let body = response.text().await?;
    debug!("Removed favourite {} for user {}", movie_id, user_id);
    Ok(serde_json::from_str(&body).ok())
}

/// Update the user's profile fields (PUT /users/:id).
pub async fn update_user(
    client: &Client,
    base_url: &str,
    access_token: &str,
    user_id: &str,
    update: &UserUpdate,
) -> Result<User, ApiError> {
    let path = format!("users/{}", urlencoding::encode(user_id));

    let response = client
        .put(endpoint(base_url, &path))
        .json(update)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    Ok(response.json().await?)
}

/// Delete the user's account (DELETE /users/:id). The response body is a
/// confirmation string and is discarded.
pub async fn delete_user(
    client: &Client,
    base_url: &str,
    access_token: &str,
    user_id: &str,
) -> Result<(), ApiError> {
    let path = format!("users/{}", urlencoding::encode(user_id));

    let response = client
        .delete(endpoint(base_url, &path))
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    debug!("Deleted user {}", user_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(
            endpoint("https://example.org/", "movies"),
            "https://example.org/movies"
        );
        assert_eq!(
            endpoint("https://example.org", "movies"),
            "https://example.org/movies"
        );
    }
}
