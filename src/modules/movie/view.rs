use maud::{html, DOCTYPE};

use super::dto::RecommendedMovie;

pub fn recommended_page(movies: &[RecommendedMovie]) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Recommended movies" }
            }
            body {
                h1 { "Recommended movies" }
                @if movies.is_empty() {
                    p { "No movies are rated high enough yet." }
                } @else {
                    ul class="movies" {
                        @for entry in movies {
                            li {
                                a href=(format!("/movies/{}", entry.movie.id)) { (entry.movie.title) }
                                " · "
                                span class="rating" { (format!("{:.1}", entry.movie.rating)) }
                                @if let Some(genre) = &entry.genre {
                                    " · "
                                    span class="genre" { (genre.name) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}
