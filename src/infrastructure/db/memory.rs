//! In-process stand-in for the PostgreSQL repositories, used by router tests.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use time::Date;

use crate::common::query::DEFAULT_LIMIT;
use crate::modules::genre::model::{Genre, GenreSort};
use crate::modules::genre::repository::GenreRepository;
use crate::modules::movie::model::{Actor, DeleteOutcome, Movie, MovieDraft, MoviePage, MovieSort, MovieWithRelations};
use crate::modules::movie::repository::{MovieRepository, MovieStoreError};

#[derive(Default)]
struct Tables {
    genres: Vec<Genre>,
    movies: Vec<Movie>,
    actors: Vec<Actor>,
    /// `(actor_id, movie_id)`
    actor_movie: Vec<(i32, i32)>,
    next_movie_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    fn touch(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        self.tables.lock().unwrap()
    }

    pub fn add_genre(&self, id: i32, name: &str, ranking: i32) {
        let mut t = self.tables.lock().unwrap();
        t.genres.push(Genre {
            id,
            name: name.to_string(),
            ranking,
            created_at: None,
            updated_at: None,
        });
    }

    pub fn add_movie(&self, id: i32, draft: MovieDraft) {
        let mut t = self.tables.lock().unwrap();
        t.next_movie_id = t.next_movie_id.max(id);
        t.movies.push(movie_from_draft(id, &draft));
    }

    pub fn add_actor(&self, id: i32, first_name: &str, last_name: &str, favorite_movie_id: Option<i32>) {
        let mut t = self.tables.lock().unwrap();
        t.actors.push(Actor {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            rating: None,
            favorite_movie_id,
            created_at: None,
            updated_at: None,
        });
    }

    pub fn cast(&self, actor_id: i32, movie_id: i32) {
        self.tables.lock().unwrap().actor_movie.push((actor_id, movie_id));
    }

    pub fn actor(&self, id: i32) -> Option<Actor> {
        self.tables.lock().unwrap().actors.iter().find(|a| a.id == id).cloned()
    }

    pub fn cast_links(&self, movie_id: i32) -> usize {
        self.tables
            .lock()
            .unwrap()
            .actor_movie
            .iter()
            .filter(|(_, m)| *m == movie_id)
            .count()
    }

    pub fn has_movie(&self, id: i32) -> bool {
        self.tables.lock().unwrap().movies.iter().any(|m| m.id == id)
    }
}

fn movie_from_draft(id: i32, draft: &MovieDraft) -> Movie {
    Movie {
        id,
        title: draft.title.clone(),
        rating: draft.rating,
        awards: draft.awards,
        release_date: draft.release_date,
        length: draft.length,
        genre_id: draft.genre_id,
        created_at: None,
        updated_at: None,
    }
}

fn with_relations(t: &Tables, movie: &Movie) -> MovieWithRelations {
    let mut actors: Vec<Actor> = t
        .actor_movie
        .iter()
        .filter(|(_, movie_id)| *movie_id == movie.id)
        .filter_map(|(actor_id, _)| t.actors.iter().find(|a| a.id == *actor_id).cloned())
        .collect();
    actors.sort_by_key(|a| a.id);

    MovieWithRelations {
        movie: movie.clone(),
        genre: movie
            .genre_id
            .and_then(|id| t.genres.iter().find(|g| g.id == id).cloned()),
        actors,
    }
}

fn compare_movies(sort: MovieSort, a: &Movie, b: &Movie) -> Ordering {
    match sort {
        MovieSort::Id => a.id.cmp(&b.id),
        MovieSort::Title => a.title.cmp(&b.title),
        MovieSort::Rating => a.rating.total_cmp(&b.rating),
        MovieSort::ReleaseDate => a.release_date.cmp(&b.release_date),
        MovieSort::Length => nulls_last(a.length, b.length),
        MovieSort::Awards => a.awards.cmp(&b.awards),
    }
}

/// PostgreSQL ascending order: NULLs sort after every value.
fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

fn page<T>(rows: Vec<T>, offset: i64, limit: i64) -> Vec<T> {
    rows.into_iter()
        .skip(usize::try_from(offset).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(DEFAULT_LIMIT as usize))
        .collect()
}

impl MemoryStore {
    fn check_genre(t: &Tables, draft: &MovieDraft) -> Result<()> {
        match draft.genre_id {
            Some(id) if !t.genres.iter().any(|g| g.id == id) => Err(MovieStoreError::UnknownGenre(id).into()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl GenreRepository for MemoryStore {
    async fn count(&self) -> Result<i64> {
        Ok(self.touch().genres.len() as i64)
    }

    async fn find_all(&self, sort: GenreSort, limit: i64) -> Result<Vec<Genre>> {
        let mut genres = self.touch().genres.clone();
        genres.sort_by(|a, b| {
            let primary = match sort {
                GenreSort::Id => Ordering::Equal,
                GenreSort::Name => a.name.cmp(&b.name),
                GenreSort::Ranking => a.ranking.cmp(&b.ranking),
            };
            primary.then(a.id.cmp(&b.id))
        });
        Ok(page(genres, 0, limit))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>> {
        Ok(self.touch().genres.iter().find(|g| g.id == id).cloned())
    }

    async fn find_by_name_containing(&self, fragment: &str) -> Result<Option<Genre>> {
        let t = self.touch();
        let mut matches: Vec<&Genre> = t.genres.iter().filter(|g| g.name.contains(fragment)).collect();
        matches.sort_by_key(|g| g.id);
        Ok(matches.first().map(|g| (*g).clone()))
    }
}

#[async_trait]
impl MovieRepository for MemoryStore {
    async fn count(&self) -> Result<i64> {
        Ok(self.touch().movies.len() as i64)
    }

    async fn find_page(&self, query: MoviePage) -> Result<Vec<MovieWithRelations>> {
        let t = self.touch();
        let mut movies = t.movies.clone();
        movies.sort_by(|a, b| {
            let primary = compare_movies(query.sort, a, b);
            let primary = if query.descending { primary.reverse() } else { primary };
            primary.then(a.id.cmp(&b.id))
        });
        Ok(page(movies, query.offset, query.limit)
            .iter()
            .map(|m| with_relations(&t, m))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MovieWithRelations>> {
        let t = self.touch();
        Ok(t.movies.iter().find(|m| m.id == id).map(|m| with_relations(&t, m)))
    }

    async fn find_rated_at_least(&self, min_rating: f64) -> Result<Vec<MovieWithRelations>> {
        let t = self.touch();
        let mut movies: Vec<&Movie> = t.movies.iter().filter(|m| m.rating >= min_rating).collect();
        movies.sort_by(|a, b| b.rating.total_cmp(&a.rating).then(a.id.cmp(&b.id)));
        Ok(movies.into_iter().map(|m| with_relations(&t, m)).collect())
    }

    async fn create(&self, draft: &MovieDraft) -> Result<Movie> {
        let mut t = self.touch();
        Self::check_genre(&t, draft)?;
        t.next_movie_id += 1;
        let movie = movie_from_draft(t.next_movie_id, draft);
        t.movies.push(movie.clone());
        Ok(movie)
    }

    async fn update(&self, id: i32, draft: &MovieDraft) -> Result<Option<Movie>> {
        let mut t = self.touch();
        Self::check_genre(&t, draft)?;
        let Some(slot) = t.movies.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        *slot = movie_from_draft(id, draft);
        Ok(Some(slot.clone()))
    }

    async fn delete_cascade(&self, id: i32) -> Result<DeleteOutcome> {
        let mut t = self.touch();

        let mut cleared_favorites = 0;
        for actor in t.actors.iter_mut().filter(|a| a.favorite_movie_id == Some(id)) {
            actor.favorite_movie_id = None;
            cleared_favorites += 1;
        }

        let before = t.actor_movie.len();
        t.actor_movie.retain(|(_, movie_id)| *movie_id != id);
        let unlinked_actors = (before - t.actor_movie.len()) as u64;

        let before = t.movies.len();
        t.movies.retain(|m| m.id != id);

        Ok(DeleteOutcome {
            cleared_favorites,
            unlinked_actors,
            deleted: t.movies.len() < before,
        })
    }
}

pub fn draft(title: &str, rating: f64, release_date: Date, genre_id: Option<i32>) -> MovieDraft {
    MovieDraft {
        title: title.to_string(),
        rating,
        awards: 1,
        release_date,
        length: Some(100),
        genre_id,
    }
}
