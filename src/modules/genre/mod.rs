use axum::Router;
use axum::routing::get;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

/// Static sub-paths are registered ahead of the `{id}` catch-all.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/genres", get(handler::list_genres))
        .route("/genres/name", get(handler::get_genre_by_missing_name))
        .route("/genres/name/", get(handler::get_genre_by_missing_name))
        .route("/genres/name/{name}", get(handler::get_genre_by_name))
        .route("/genres/{id}", get(handler::get_genre))
}
