use axum::Router;
use axum::routing::get;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;
pub mod view;

/// Static sub-paths are registered ahead of the `{id}` catch-all.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", get(handler::list_movies).post(handler::create_movie))
        .route("/movies/new", get(handler::newest_movies))
        .route("/movies/recommended", get(handler::recommended_movies))
        .route(
            "/movies/{id}",
            get(handler::get_movie)
                .put(handler::update_movie)
                .delete(handler::delete_movie),
        )
}
