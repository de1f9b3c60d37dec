use utoipa::OpenApi;
use crate::common::error::FieldError;
use crate::common::response::{ApiErrorResponse, Meta};
use crate::modules::genre::dto::{GenreData, GenreListData, GenreResponse};
use crate::modules::movie::dto::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::genre::handler::list_genres,
        crate::modules::genre::handler::get_genre_by_name,
        crate::modules::genre::handler::get_genre,
        crate::modules::movie::handler::list_movies,
        crate::modules::movie::handler::newest_movies,
        crate::modules::movie::handler::recommended_movies,
        crate::modules::movie::handler::get_movie,
        crate::modules::movie::handler::create_movie,
        crate::modules::movie::handler::update_movie,
        crate::modules::movie::handler::delete_movie,
    ),
    components(
        schemas(
            Meta, ApiErrorResponse, FieldError,
            GenreResponse, GenreListData, GenreData,
            MoviePayload, ActorResponse, MovieResponse, MovieListItem, MovieDetail,
            RecommendedMovie, MovieListData, NewestMoviesData, RecommendedMoviesData,
            MovieDetailData, MovieData, MovieUpdatedData, MessageData,
        )
    ),
    tags(
        (name = "Genres", description = "Genre lookup"),
        (name = "Movies", description = "Movie catalog management")
    )
)]
pub struct ApiDoc;
