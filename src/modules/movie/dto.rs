use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::model::{format_display_date, format_iso_date, Actor, Movie, MovieWithRelations};
use crate::modules::genre::dto::GenreResponse;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMoviesQuery {
    /// One of `title`, `ranking`, `release_date`, `length`, `awards`.
    pub order: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NewestMoviesQuery {
    pub limit: Option<String>,
}

/// Body for both create and update. On update, falsy values are ignored.
///
/// Numeric fields also accept numeric strings; an empty string counts as absent.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MoviePayload {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub awards: Option<i32>,
    /// `YYYY-MM-DD`
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub length: Option<i32>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub genre_id: Option<i32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Int(n)) => Ok(Some(n as f64)),
        Some(NumberOrText::Float(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(raw)) => match raw.trim() {
            "" => Ok(None),
            text => text
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("expected a number, found \"{text}\""))),
        },
    }
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let out_of_range = |n: i64| -> D::Error { de::Error::custom(format!("{n} is out of range for an integer field")) };
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Int(n)) => i32::try_from(n).map(Some).map_err(|_| out_of_range(n)),
        Some(NumberOrText::Float(n)) => Err(de::Error::custom(format!("expected an integer, found {n}"))),
        Some(NumberOrText::Text(raw)) => match raw.trim() {
            "" => Ok(None),
            text => text
                .parse::<i32>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("expected an integer, found \"{text}\""))),
        },
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActorResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub rating: Option<f64>,
    pub favorite_movie_id: Option<i32>,
}

impl From<Actor> for ActorResponse {
    fn from(a: Actor) -> Self {
        Self {
            id: a.id,
            first_name: a.first_name,
            last_name: a.last_name,
            rating: a.rating,
            favorite_movie_id: a.favorite_movie_id,
        }
    }
}

/// Movie columns without audit timestamps.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub rating: f64,
    pub awards: i32,
    /// `YYYY-MM-DD`
    pub release_date: String,
    pub length: Option<i32>,
    pub genre_id: Option<i32>,
}

impl From<Movie> for MovieResponse {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id,
            title: m.title,
            rating: m.rating,
            awards: m.awards,
            release_date: format_iso_date(m.release_date),
            length: m.length,
            genre_id: m.genre_id,
        }
    }
}

/// Collection entry: movie with genre, cast and a link to itself.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MovieListItem {
    #[serde(flatten)]
    pub movie: MovieResponse,
    pub genre: Option<GenreResponse>,
    pub actors: Vec<ActorResponse>,
    pub link: String,
}

impl MovieListItem {
    pub fn new(entry: MovieWithRelations, link: String) -> Self {
        Self {
            movie: entry.movie.into(),
            genre: entry.genre.map(GenreResponse::from),
            actors: entry.actors.into_iter().map(ActorResponse::from).collect(),
            link,
        }
    }
}

/// Single-movie view: no `genre_id`, date as `DD-MM-YYYY`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MovieDetail {
    pub id: i32,
    pub title: String,
    pub rating: f64,
    pub awards: i32,
    pub release_date: String,
    pub length: Option<i32>,
    pub genre: Option<GenreResponse>,
    pub actors: Vec<ActorResponse>,
}

impl From<MovieWithRelations> for MovieDetail {
    fn from(entry: MovieWithRelations) -> Self {
        let m = entry.movie;
        Self {
            id: m.id,
            title: m.title,
            rating: m.rating,
            awards: m.awards,
            release_date: format_display_date(m.release_date),
            length: m.length,
            genre: entry.genre.map(GenreResponse::from),
            actors: entry.actors.into_iter().map(ActorResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecommendedMovie {
    #[serde(flatten)]
    pub movie: MovieResponse,
    pub genre: Option<GenreResponse>,
}

impl From<MovieWithRelations> for RecommendedMovie {
    fn from(entry: MovieWithRelations) -> Self {
        Self {
            movie: entry.movie.into(),
            genre: entry.genre.map(GenreResponse::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieListData {
    pub items: usize,
    pub total: i64,
    pub movies: Vec<MovieListItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NewestMoviesData {
    pub movies: Vec<MovieListItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendedMoviesData {
    pub movies: Vec<RecommendedMovie>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieDetailData {
    pub movie: MovieDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieData {
    pub movie: MovieResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieUpdatedData {
    pub movie: MovieResponse,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageData {
    pub message: String,
}
