use super::model::{Genre, GenreSort};
use crate::common::query::SortColumn;
use crate::infrastructure::db::pool::DbPool;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

const GENRE_COLUMNS: &str = "id, name, ranking, created_at, updated_at";

#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// Total number of genres, ignoring paging.
    async fn count(&self) -> Result<i64>;

    async fn find_all(&self, sort: GenreSort, limit: i64) -> Result<Vec<Genre>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>>;

    /// First genre (by id) whose name contains `fragment`.
    async fn find_by_name_containing(&self, fragment: &str) -> Result<Option<Genre>>;
}

pub struct PgGenreRepository {
    pool: DbPool,
}

impl PgGenreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreRepository for PgGenreRepository {
    async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to count genres: {}", e))?;

        Ok(total)
    }

    async fn find_all(&self, sort: GenreSort, limit: i64) -> Result<Vec<Genre>> {
        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {GENRE_COLUMNS} FROM genres ORDER BY "));
        query
            .push(sort.column())
            .push(" ASC, id ASC LIMIT ")
            .push_bind(limit);

        let genres = query
            .build_query_as::<Genre>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to fetch genres: {}", e))?;

        Ok(genres)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>(&format!("SELECT {GENRE_COLUMNS} FROM genres WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to fetch genre: {}", e))?;

        Ok(genre)
    }

    async fn find_by_name_containing(&self, fragment: &str) -> Result<Option<Genre>> {
        let pattern = format!("%{}%", escape_like(fragment));
        let genre = sqlx::query_as::<_, Genre>(&format!(
            "SELECT {GENRE_COLUMNS} FROM genres WHERE name LIKE $1 ORDER BY id LIMIT 1"
        ))
        .bind(pattern)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to search genres: {}", e))?;

        Ok(genre)
    }
}

/// Escapes LIKE wildcards so user input matches literally (`\` is the
/// PostgreSQL default escape character).
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
