use sqlx::PgPool;

const CATALOG: &str = include_str!("../../../fixtures/catalog.sql");

/// Loads the six-genre, six-movie, three-actor catalog used by repository tests.
pub async fn seed_catalog(pool: &PgPool) -> sqlx::Result<()> {
    for stmt in CATALOG.split(';') {
        let stmt = stmt.trim();
        if stmt.is_empty() {
            continue;
        }
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}
