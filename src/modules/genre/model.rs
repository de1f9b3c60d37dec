use sqlx::FromRow;
use time::OffsetDateTime;

use crate::common::query::SortColumn;

#[derive(Debug, Clone, FromRow)]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub ranking: i32,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreSort {
    Id,
    Name,
    Ranking,
}

impl SortColumn for GenreSort {
    const ALLOWED: &'static [(&'static str, Self)] =
        &[("name", GenreSort::Name), ("ranking", GenreSort::Ranking)];
    const DEFAULT: Self = GenreSort::Id;

    fn column(self) -> &'static str {
        match self {
            GenreSort::Id => "id",
            GenreSort::Name => "name",
            GenreSort::Ranking => "ranking",
        }
    }
}
