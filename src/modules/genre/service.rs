use super::dto::{GenreData, GenreListData, GenreResponse, ListGenresQuery};
use super::model::GenreSort;
use crate::common::error::{AppError, AppResult};
use crate::common::query::{self, DEFAULT_LIMIT};
use crate::state::AppState;

pub struct GenreService;

impl GenreService {
    pub async fn list(state: AppState, params: ListGenresQuery) -> AppResult<GenreListData> {
        let sort = query::resolve_order::<GenreSort>(params.order.as_deref())?;
        let limit = query::parse_count("limit", params.limit.as_deref(), DEFAULT_LIMIT)?;

        let total = state.genres.count().await?;
        let genres: Vec<GenreResponse> = state
            .genres
            .find_all(sort, limit)
            .await?
            .into_iter()
            .map(GenreResponse::from)
            .collect();

        Ok(GenreListData {
            items: genres.len(),
            total,
            genres,
        })
    }

    pub async fn find_by_id(state: AppState, raw_id: &str) -> AppResult<GenreData> {
        let id = query::parse_id(raw_id)?;
        let genre = state
            .genres
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("No genre exists with that ID".to_string()))?;

        Ok(GenreData {
            genre: genre.into(),
            total: 1,
        })
    }

    pub async fn find_by_name(state: AppState, name: &str) -> AppResult<GenreData> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidParameter("The name is required".to_string()));
        }

        let genre = state
            .genres
            .find_by_name_containing(name)
            .await?
            .ok_or_else(|| AppError::NotFound("No genre found with that name".to_string()))?;

        Ok(GenreData {
            genre: genre.into(),
            total: 1,
        })
    }
}
