use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::modules::genre::model::Genre;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListGenresQuery {
    /// `name` or `ranking`; defaults to id order.
    pub order: Option<String>,
    /// Page size, defaults to 5.
    pub limit: Option<String>,
}

/// Genre without its audit timestamps.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreResponse {
    pub id: i32,
    pub name: String,
    pub ranking: i32,
}

impl From<Genre> for GenreResponse {
    fn from(g: Genre) -> Self {
        Self {
            id: g.id,
            name: g.name,
            ranking: g.ranking,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreListData {
    pub items: usize,
    pub total: i64,
    pub genres: Vec<GenreResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreData {
    pub genre: GenreResponse,
    pub total: i64,
}
