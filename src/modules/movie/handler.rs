use super::dto::{
    ListMoviesQuery, MessageData, MovieData, MovieDetailData, MovieListData, MoviePayload,
    MovieUpdatedData, NewestMoviesData, RecommendedMoviesData,
};
use super::service::MovieService;
use super::view;
use crate::common::error::{AppError, AppResult};
use crate::common::response::{ApiErrorResponse, ApiResponse, ApiSuccess};
use crate::common::url::RequestUrl;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Json,
};

fn json_body(payload: Result<Json<MoviePayload>, JsonRejection>) -> AppResult<MoviePayload> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidParameter(rejection.body_text()))
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

/// List movies
#[utoipa::path(
    get,
    path = "/movies",
    params(ListMoviesQuery),
    responses(
        (status = 200, description = "Page of movies with genre and actors", body = ApiResponse<MovieListData>),
        (status = 400, description = "Invalid order, limit or offset", body = ApiErrorResponse),
        (status = 500, description = "Internal Server Error", body = ApiErrorResponse)
    ),
    tag = "Movies"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    url: RequestUrl,
    Query(params): Query<ListMoviesQuery>,
) -> AppResult<impl IntoResponse> {
    let data = MovieService::list(state, params, url).await?;
    Ok(ApiSuccess::ok(data))
}

/// Most recently released movies
#[utoipa::path(
    get,
    path = "/movies/new",
    params(super::dto::NewestMoviesQuery),
    responses(
        (status = 200, description = "Movies by release date, newest first", body = ApiResponse<NewestMoviesData>),
        (status = 400, description = "Invalid limit", body = ApiErrorResponse)
    ),
    tag = "Movies"
)]
pub async fn newest_movies(
    State(state): State<AppState>,
    url: RequestUrl,
    Query(params): Query<super::dto::NewestMoviesQuery>,
) -> AppResult<impl IntoResponse> {
    let data = MovieService::newest(state, params.limit.as_deref(), url).await?;
    Ok(ApiSuccess::ok(data))
}

/// Movies rated 8 or higher
///
/// Renders an HTML page unless the client asks for `application/json`.
#[utoipa::path(
    get,
    path = "/movies/recommended",
    responses(
        (status = 200, description = "Recommended movies as an HTML page or JSON envelope", content(
            (String = "text/html"),
            (ApiResponse<RecommendedMoviesData> = "application/json")
        ))
    ),
    tag = "Movies"
)]
pub async fn recommended_movies(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let movies = MovieService::recommended(state).await?;

    if wants_json(&headers) {
        return Ok(ApiSuccess::ok(RecommendedMoviesData { movies }).into_response());
    }
    Ok(Html(view::recommended_page(&movies)).into_response())
}

/// Get movie by ID
#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie with genre and actors", body = ApiResponse<MovieDetailData>),
        (status = 400, description = "Non-numeric ID or movie not found", body = ApiErrorResponse)
    ),
    tag = "Movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let data = MovieService::get(state, &id).await?;
    Ok(ApiSuccess::ok(data))
}

/// Create a movie
#[utoipa::path(
    post,
    path = "/movies",
    request_body = MoviePayload,
    responses(
        (status = 201, description = "Movie created", body = ApiResponse<MovieData>),
        (status = 400, description = "Validation failed", body = ApiErrorResponse),
        (status = 500, description = "Internal Server Error", body = ApiErrorResponse)
    ),
    tag = "Movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    payload: Result<Json<MoviePayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = json_body(payload)?;
    let data = MovieService::create(state, payload).await?;
    Ok(ApiSuccess::created(data))
}

/// Update a movie
///
/// Only truthy values replace stored ones; `""`, `0` and `null` are ignored.
#[utoipa::path(
    put,
    path = "/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    request_body = MoviePayload,
    responses(
        (status = 200, description = "Movie updated", body = ApiResponse<MovieUpdatedData>),
        (status = 400, description = "Bad Request", body = ApiErrorResponse),
        (status = 500, description = "Internal Server Error", body = ApiErrorResponse)
    ),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MoviePayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = json_body(payload)?;
    let data = MovieService::update(state, &id, payload).await?;
    Ok(ApiSuccess::ok(data))
}

/// Delete a movie
///
/// Clears actor favourites and cast links first. Unknown ids succeed as a no-op.
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie deleted", body = ApiResponse<MessageData>),
        (status = 400, description = "Non-numeric ID", body = ApiErrorResponse),
        (status = 500, description = "Internal Server Error", body = ApiErrorResponse)
    ),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let data = MovieService::delete(state, &id).await?;
    Ok(ApiSuccess::ok(data))
}
