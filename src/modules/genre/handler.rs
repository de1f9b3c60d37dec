use super::dto::{GenreData, GenreListData, ListGenresQuery};
use super::service::GenreService;
use crate::common::error::AppResult;
use crate::common::response::{ApiErrorResponse, ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};

/// List genres
#[utoipa::path(
    get,
    path = "/genres",
    params(ListGenresQuery),
    responses(
        (status = 200, description = "Page of genres", body = ApiResponse<GenreListData>),
        (status = 400, description = "Invalid order or limit", body = ApiErrorResponse)
    ),
    tag = "Genres"
)]
pub async fn list_genres(
    State(state): State<AppState>,
    Query(params): Query<ListGenresQuery>,
) -> AppResult<impl IntoResponse> {
    let data = GenreService::list(state, params).await?;
    Ok(ApiSuccess::ok(data))
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/genres/{id}",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre details", body = ApiResponse<GenreData>),
        (status = 400, description = "Non-numeric ID or genre not found", body = ApiErrorResponse)
    ),
    tag = "Genres"
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let data = GenreService::find_by_id(state, &id).await?;
    Ok(ApiSuccess::ok(data))
}

/// Find the first genre whose name contains the given text
#[utoipa::path(
    get,
    path = "/genres/name/{name}",
    params(
        ("name" = String, Path, description = "Substring of the genre name")
    ),
    responses(
        (status = 200, description = "Matching genre", body = ApiResponse<GenreData>),
        (status = 400, description = "Missing name or no match", body = ApiErrorResponse)
    ),
    tag = "Genres"
)]
pub async fn get_genre_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let data = GenreService::find_by_name(state, &name).await?;
    Ok(ApiSuccess::ok(data))
}

/// `/genres/name` without a name segment.
pub async fn get_genre_by_missing_name(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = GenreService::find_by_name(state, "").await?;
    Ok(ApiSuccess::ok(data))
}
