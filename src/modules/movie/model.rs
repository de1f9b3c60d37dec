use sqlx::FromRow;
use time::{macros::format_description, Date, OffsetDateTime};
use validator::Validate;

use super::dto::MoviePayload;
use crate::common::error::{AppError, AppResult, FieldError};
use crate::common::query::SortColumn;
use crate::modules::genre::model::Genre;

/// Movies rated at or above this show up as recommended.
pub const RECOMMENDED_MIN_RATING: f64 = 8.0;

#[derive(Debug, Clone, FromRow)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub rating: f64,
    pub awards: i32,
    pub release_date: Date,
    pub length: Option<i32>,
    pub genre_id: Option<i32>,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Actor {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub rating: Option<f64>,
    pub favorite_movie_id: Option<i32>,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

/// Actor row joined through `actor_movie`.
#[derive(Debug, Clone, FromRow)]
pub struct CastMember {
    pub movie_id: i32,
    #[sqlx(flatten)]
    pub actor: Actor,
}

#[derive(Debug, Clone)]
pub struct MovieWithRelations {
    pub movie: Movie,
    pub genre: Option<Genre>,
    pub actors: Vec<Actor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieSort {
    Id,
    Title,
    Rating,
    ReleaseDate,
    Length,
    Awards,
}

impl SortColumn for MovieSort {
    // `ranking` is the public name for the rating column.
    const ALLOWED: &'static [(&'static str, Self)] = &[
        ("title", MovieSort::Title),
        ("ranking", MovieSort::Rating),
        ("release_date", MovieSort::ReleaseDate),
        ("length", MovieSort::Length),
        ("awards", MovieSort::Awards),
    ];
    const DEFAULT: Self = MovieSort::Id;

    fn column(self) -> &'static str {
        match self {
            MovieSort::Id => "id",
            MovieSort::Title => "title",
            MovieSort::Rating => "rating",
            MovieSort::ReleaseDate => "release_date",
            MovieSort::Length => "length",
            MovieSort::Awards => "awards",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoviePage {
    pub sort: MovieSort,
    pub descending: bool,
    pub limit: i64,
    pub offset: i64,
}

/// What a cascading delete touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub cleared_favorites: u64,
    pub unlinked_actors: u64,
    pub deleted: bool,
}

/// Column values written on insert or update.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct MovieDraft {
    #[validate(length(min = 1, max = 500, message = "title must be between 1 and 500 characters"))]
    pub title: String,
    #[validate(range(min = 0.0, max = 10.0, message = "rating must be between 0 and 10"))]
    pub rating: f64,
    #[validate(range(min = 0, message = "awards must not be negative"))]
    pub awards: i32,
    pub release_date: Date,
    #[validate(range(min = 1, message = "length must be a positive number of minutes"))]
    pub length: Option<i32>,
    pub genre_id: Option<i32>,
}

impl MovieDraft {
    /// Builds a draft for a new movie; every missing required field is reported.
    pub fn from_payload(payload: MoviePayload) -> AppResult<Self> {
        let mut errors = Vec::new();

        let title = truthy_str(&payload.title).map(str::to_string);
        if title.is_none() {
            errors.push(FieldError::new("title", "title is required"));
        }
        if payload.rating.is_none() {
            errors.push(FieldError::new("rating", "rating is required"));
        }
        if payload.awards.is_none() {
            errors.push(FieldError::new("awards", "awards is required"));
        }
        let release_date = match truthy_str(&payload.release_date) {
            None => {
                errors.push(FieldError::new("release_date", "release_date is required"));
                None
            }
            Some(raw) => match parse_release_date(raw) {
                Ok(date) => Some(date),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
        };

        let (Some(title), Some(rating), Some(awards), Some(release_date)) =
            (title, payload.rating, payload.awards, release_date)
        else {
            return Err(AppError::validation(errors));
        };

        let draft = Self {
            title,
            rating,
            awards,
            release_date,
            length: payload.length,
            genre_id: payload.genre_id,
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            rating: movie.rating,
            awards: movie.awards,
            release_date: movie.release_date,
            length: movie.length,
            genre_id: movie.genre_id,
        }
    }

    /// Applies a partial update. A field is replaced only when the supplied
    /// value is truthy; empty strings, zero and null keep the stored value.
    pub fn merge(mut self, patch: &MoviePayload) -> AppResult<Self> {
        if let Some(title) = truthy_str(&patch.title) {
            self.title = title.to_string();
        }
        if let Some(rating) = patch.rating.filter(|r| *r != 0.0 && !r.is_nan()) {
            self.rating = rating;
        }
        if let Some(awards) = patch.awards.filter(|a| *a != 0) {
            self.awards = awards;
        }
        if let Some(raw) = truthy_str(&patch.release_date) {
            self.release_date = parse_release_date(raw).map_err(|e| AppError::validation(vec![e]))?;
        }
        if let Some(length) = patch.length.filter(|l| *l != 0) {
            self.length = Some(length);
        }
        if let Some(genre_id) = patch.genre_id.filter(|g| *g != 0) {
            self.genre_id = Some(genre_id);
        }

        self.validate()?;
        Ok(self)
    }
}

fn truthy_str(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part kept).
pub fn parse_release_date(raw: &str) -> Result<Date, FieldError> {
    let iso = format_description!("[year]-[month]-[day]");
    Date::parse(raw, iso)
        .or_else(|_| {
            OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339).map(|dt| dt.date())
        })
        .map_err(|_| FieldError::new("release_date", "release_date must be a date in YYYY-MM-DD format"))
}

pub fn format_iso_date(date: Date) -> String {
    let iso = format_description!("[year]-[month]-[day]");
    date.format(iso).unwrap_or_else(|_| date.to_string())
}

/// `DD-MM-YYYY`, used by the single-movie view.
pub fn format_display_date(date: Date) -> String {
    let display = format_description!("[day]-[month]-[year]");
    date.format(display).unwrap_or_else(|_| date.to_string())
}
