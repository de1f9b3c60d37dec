use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use time::macros::date;
use tower::ServiceExt;

use crate::config::settings::AppConfig;
use crate::infrastructure::db::memory::{draft, MemoryStore};
use crate::state::AppState;

pub fn test_config() -> AppConfig {
    AppConfig {
        server_host: "127.0.0.1".into(),
        server_port: 0,
        database_url: "postgres://unused".into(),
        db_max_connections: 1,
        db_min_connections: 0,
        run_migrations: false,
        public_url: None,
    }
}

/// Six genres, six movies and three actors with favourites and cast links.
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new();

    store.add_genre(1, "Drama", 3);
    store.add_genre(2, "Comedy", 1);
    store.add_genre(3, "Action", 2);
    store.add_genre(4, "Animation", 5);
    store.add_genre(5, "Romantic Comedy", 4);
    store.add_genre(6, "Documentary", 6);

    store.add_movie(1, draft("Toy Story", 9.0, date!(1995 - 11 - 22), Some(4)));
    store.add_movie(2, draft("Avatar", 7.9, date!(2009 - 12 - 18), Some(3)));
    store.add_movie(3, draft("La Vida es Bella", 8.3, date!(1997 - 12 - 20), Some(1)));
    store.add_movie(4, draft("Big", 7.3, date!(1988 - 06 - 03), Some(2)));
    store.add_movie(5, draft("Mi pobre angelito", 5.9, date!(1990 - 11 - 16), Some(2)));
    store.add_movie(6, draft("Parque Jurasico", 8.8, date!(1993 - 06 - 11), None));

    store.add_actor(1, "Sam", "Worthington", Some(2));
    store.add_actor(2, "Tom", "Hanks", Some(1));
    store.add_actor(3, "Zoe", "Saldana", None);

    store.cast(1, 2);
    store.cast(3, 2);
    store.cast(2, 1);
    store.cast(2, 4);

    Arc::new(store)
}

pub fn test_app(store: Arc<MemoryStore>) -> (Router, Arc<MemoryStore>) {
    let state = AppState::new(test_config(), store.clone(), store.clone());
    (crate::app::create_app(state), store)
}

pub async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    call(app, request).await
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    call(app, request).await
}
