use std::collections::HashMap;

use super::model::{CastMember, DeleteOutcome, Movie, MovieDraft, MoviePage, MovieWithRelations};
use crate::common::query::SortColumn;
use crate::infrastructure::db::pool::DbPool;
use crate::modules::genre::model::Genre;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use thiserror::Error;

const MOVIE_COLUMNS: &str =
    "id, title, rating, awards, release_date, length, genre_id, created_at, updated_at";

/// Store rejections the service reports as field errors.
#[derive(Debug, Error)]
pub enum MovieStoreError {
    #[error("genre {0} does not exist")]
    UnknownGenre(i32),
}

#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn count(&self) -> Result<i64>;

    async fn find_page(&self, page: MoviePage) -> Result<Vec<MovieWithRelations>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<MovieWithRelations>>;

    /// Movies rated at least `min_rating`, best first.
    async fn find_rated_at_least(&self, min_rating: f64) -> Result<Vec<MovieWithRelations>>;

    async fn create(&self, draft: &MovieDraft) -> Result<Movie>;

    /// `None` when the row no longer exists.
    async fn update(&self, id: i32, draft: &MovieDraft) -> Result<Option<Movie>>;

    /// Clears actor favourites, removes cast links, then deletes the movie,
    /// all or nothing.
    async fn delete_cascade(&self, id: i32) -> Result<DeleteOutcome>;
}

pub struct PgMovieRepository {
    pool: DbPool,
}

impl PgMovieRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn attach_relations(&self, movies: Vec<Movie>) -> Result<Vec<MovieWithRelations>> {
        if movies.is_empty() {
            return Ok(Vec::new());
        }

        let movie_ids: Vec<i32> = movies.iter().map(|m| m.id).collect();
        let mut genre_ids: Vec<i32> = movies.iter().filter_map(|m| m.genre_id).collect();
        genre_ids.sort_unstable();
        genre_ids.dedup();

        let genres = sqlx::query_as::<_, Genre>(
            "SELECT id, name, ranking, created_at, updated_at FROM genres WHERE id = ANY($1)",
        )
        .bind(genre_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch movie genres: {}", e))?;

        let cast = sqlx::query_as::<_, CastMember>(
            r#"
            SELECT am.movie_id, a.id, a.first_name, a.last_name, a.rating,
                   a.favorite_movie_id, a.created_at, a.updated_at
            FROM actor_movie am
            JOIN actors a ON a.id = am.actor_id
            WHERE am.movie_id = ANY($1)
            ORDER BY a.id
            "#,
        )
        .bind(movie_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch movie actors: {}", e))?;

        let genres: HashMap<i32, Genre> = genres.into_iter().map(|g| (g.id, g)).collect();
        let mut actors_by_movie: HashMap<i32, Vec<_>> = HashMap::new();
        for member in cast {
            actors_by_movie.entry(member.movie_id).or_default().push(member.actor);
        }

        Ok(movies
            .into_iter()
            .map(|movie| MovieWithRelations {
                genre: movie.genre_id.and_then(|id| genres.get(&id).cloned()),
                actors: actors_by_movie.remove(&movie.id).unwrap_or_default(),
                movie,
            })
            .collect())
    }
}

fn map_write_error(err: sqlx::Error, draft: &MovieDraft) -> anyhow::Error {
    let is_fk_violation = err
        .as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation());

    match (is_fk_violation, draft.genre_id) {
        (true, Some(genre_id)) => MovieStoreError::UnknownGenre(genre_id).into(),
        _ => anyhow!("Failed to save movie: {}", err),
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to count movies: {}", e))?;

        Ok(total)
    }

    async fn find_page(&self, page: MoviePage) -> Result<Vec<MovieWithRelations>> {
        let direction = if page.descending { " DESC" } else { " ASC" };

        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY "));
        query
            .push(page.sort.column())
            .push(direction)
            .push(", id ASC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let movies = query
            .build_query_as::<Movie>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to fetch movies: {}", e))?;

        self.attach_relations(movies).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MovieWithRelations>> {
        let movie = sqlx::query_as::<_, Movie>(&format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to fetch movie: {}", e))?;

        match movie {
            Some(movie) => Ok(self.attach_relations(vec![movie]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_rated_at_least(&self, min_rating: f64) -> Result<Vec<MovieWithRelations>> {
        let movies = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE rating >= $1 ORDER BY rating DESC, id ASC"
        ))
        .bind(min_rating)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch recommended movies: {}", e))?;

        self.attach_relations(movies).await
    }

    async fn create(&self, draft: &MovieDraft) -> Result<Movie> {
        let movie = sqlx::query_as::<_, Movie>(&format!(
            r#"
            INSERT INTO movies (title, rating, awards, release_date, length, genre_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(draft.rating)
        .bind(draft.awards)
        .bind(draft.release_date)
        .bind(draft.length)
        .bind(draft.genre_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, draft))?;

        Ok(movie)
    }

    async fn update(&self, id: i32, draft: &MovieDraft) -> Result<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(&format!(
            r#"
            UPDATE movies
            SET title = $1,
                rating = $2,
                awards = $3,
                release_date = $4,
                length = $5,
                genre_id = $6,
                updated_at = NOW()
            WHERE id = $7
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(draft.rating)
        .bind(draft.awards)
        .bind(draft.release_date)
        .bind(draft.length)
        .bind(draft.genre_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, draft))?;

        Ok(movie)
    }

    async fn delete_cascade(&self, id: i32) -> Result<DeleteOutcome> {
        // Dropping `tx` before commit rolls every step back.
        let mut tx = self.pool.begin().await?;

        let cleared_favorites = sqlx::query("UPDATE actors SET favorite_movie_id = NULL WHERE favorite_movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| anyhow!("Failed to clear favorite movie references: {}", e))?
            .rows_affected();

        let unlinked_actors = sqlx::query("DELETE FROM actor_movie WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| anyhow!("Failed to unlink movie actors: {}", e))?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| anyhow!("Failed to delete movie: {}", e))?
            .rows_affected()
            > 0;

        tx.commit().await?;

        Ok(DeleteOutcome {
            cleared_favorites,
            unlinked_actors,
            deleted,
        })
    }
}
