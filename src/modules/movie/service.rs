use super::dto::{
    ListMoviesQuery, MessageData, MovieData, MovieDetail, MovieDetailData, MovieListData,
    MovieListItem, MoviePayload, MovieResponse, MovieUpdatedData, NewestMoviesData,
    RecommendedMovie,
};
use super::model::{MovieDraft, MoviePage, MovieSort, RECOMMENDED_MIN_RATING};
use super::repository::MovieStoreError;
use crate::common::error::{AppError, AppResult, FieldError};
use crate::common::query::{self, DEFAULT_LIMIT};
use crate::common::url::RequestUrl;
use crate::state::AppState;
use tracing::info;

pub struct MovieService;

impl MovieService {
    pub async fn list(state: AppState, params: ListMoviesQuery, url: RequestUrl) -> AppResult<MovieListData> {
        let sort = query::resolve_order::<MovieSort>(params.order.as_deref())?;
        let limit = query::parse_count("limit", params.limit.as_deref(), DEFAULT_LIMIT)?;
        let offset = query::parse_count("offset", params.offset.as_deref(), 0)?;

        let total = state.movies.count().await?;
        let movies: Vec<MovieListItem> = state
            .movies
            .find_page(MoviePage {
                sort,
                descending: false,
                limit,
                offset,
            })
            .await?
            .into_iter()
            .map(|entry| {
                let link = url.link(entry.movie.id);
                MovieListItem::new(entry, link)
            })
            .collect();

        Ok(MovieListData {
            items: movies.len(),
            total,
            movies,
        })
    }

    pub async fn get(state: AppState, raw_id: &str) -> AppResult<MovieDetailData> {
        let id = query::parse_id(raw_id)?;
        let entry = state
            .movies
            .find_by_id(id)
            .await?
            .ok_or_else(Self::not_found)?;

        Ok(MovieDetailData {
            movie: MovieDetail::from(entry),
        })
    }

    pub async fn newest(state: AppState, limit: Option<&str>, url: RequestUrl) -> AppResult<NewestMoviesData> {
        let limit = query::parse_count("limit", limit, DEFAULT_LIMIT)?;
        let url = url.without_suffix("/new");

        let movies = state
            .movies
            .find_page(MoviePage {
                sort: MovieSort::ReleaseDate,
                descending: true,
                limit,
                offset: 0,
            })
            .await?
            .into_iter()
            .map(|entry| {
                let link = url.link(entry.movie.id);
                MovieListItem::new(entry, link)
            })
            .collect();

        Ok(NewestMoviesData { movies })
    }

    pub async fn recommended(state: AppState) -> AppResult<Vec<RecommendedMovie>> {
        let movies = state
            .movies
            .find_rated_at_least(RECOMMENDED_MIN_RATING)
            .await?
            .into_iter()
            .map(RecommendedMovie::from)
            .collect();

        Ok(movies)
    }

    pub async fn create(state: AppState, payload: MoviePayload) -> AppResult<MovieData> {
        let draft = MovieDraft::from_payload(payload)?;
        let movie = state.movies.create(&draft).await.map_err(Self::store_error)?;
        info!(movie_id = movie.id, title = %movie.title, "movie created");

        Ok(MovieData {
            movie: MovieResponse::from(movie),
        })
    }

    pub async fn update(state: AppState, raw_id: &str, patch: MoviePayload) -> AppResult<MovieUpdatedData> {
        let id = query::parse_id(raw_id)?;
        let current = state
            .movies
            .find_by_id(id)
            .await?
            .ok_or_else(Self::not_found)?;

        let draft = MovieDraft::from_movie(&current.movie).merge(&patch)?;
        let movie = state
            .movies
            .update(id, &draft)
            .await
            .map_err(Self::store_error)?
            .ok_or_else(Self::not_found)?;
        info!(movie_id = id, "movie updated");

        Ok(MovieUpdatedData {
            movie: MovieResponse::from(movie),
            message: "Movie updated successfully".to_string(),
        })
    }

    /// Deleting an unknown id succeeds without touching anything.
    pub async fn delete(state: AppState, raw_id: &str) -> AppResult<MessageData> {
        let id = query::parse_id(raw_id)?;
        let outcome = state.movies.delete_cascade(id).await?;

        let message = if outcome.deleted {
            info!(
                movie_id = id,
                cleared_favorites = outcome.cleared_favorites,
                unlinked_actors = outcome.unlinked_actors,
                "movie deleted"
            );
            "Movie deleted successfully".to_string()
        } else {
            format!("Movie {} does not exist, nothing was deleted", id)
        };

        Ok(MessageData { message })
    }

    fn not_found() -> AppError {
        AppError::NotFound("No movie exists with that ID".to_string())
    }

    fn store_error(err: anyhow::Error) -> AppError {
        match err.downcast_ref::<MovieStoreError>() {
            Some(rejection @ MovieStoreError::UnknownGenre(_)) => {
                AppError::validation(vec![FieldError::new("genre_id", rejection.to_string())])
            }
            None => AppError::Internal(err),
        }
    }
}
