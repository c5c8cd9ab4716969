//! Saved movie model and related functionality
//!
//! Field names on the wire keep the client-facing casing
//! (`trailerLink`, `nameRU`, `nameEN`, `movieId`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Saved movie entity
///
/// `owner` is set at creation time and never changes; only the owner
/// may delete the record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub owner: Uuid,
    pub country: String,
    pub director: String,
    pub duration: i32,
    pub year: String,
    pub description: String,
    pub image: String,
    #[serde(rename = "trailerLink")]
    pub trailer_link: String,
    #[serde(rename = "nameRU")]
    pub name_ru: String,
    #[serde(rename = "nameEN")]
    pub name_en: String,
    pub thumbnail: String,
    #[serde(rename = "movieId")]
    pub movie_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Movie creation payload (POST /movies body)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMovie {
    pub country: String,
    pub director: String,
    pub duration: i32,
    pub year: String,
    pub description: String,
    pub image: String,
    #[serde(rename = "trailerLink")]
    pub trailer_link: String,
    #[serde(rename = "nameRU")]
    pub name_ru: String,
    #[serde(rename = "nameEN")]
    pub name_en: String,
    pub thumbnail: String,
    #[serde(rename = "movieId")]
    pub movie_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_serializes_wire_field_names() {
        let movie = Movie {
            id: Uuid::new_v4(),
            owner: Uuid::new_v4(),
            country: "France".to_string(),
            director: "Jean-Pierre Jeunet".to_string(),
            duration: 122,
            year: "2001".to_string(),
            description: "A shy waitress decides to help those around her.".to_string(),
            image: "https://example.com/amelie.jpg".to_string(),
            trailer_link: "https://example.com/amelie-trailer".to_string(),
            name_ru: "Амели".to_string(),
            name_en: "Amelie".to_string(),
            thumbnail: "https://example.com/amelie-thumb.jpg".to_string(),
            movie_id: 42,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["trailerLink"], "https://example.com/amelie-trailer");
        assert_eq!(value["nameRU"], "Амели");
        assert_eq!(value["nameEN"], "Amelie");
        assert_eq!(value["movieId"], 42);
        assert!(value.get("trailer_link").is_none());
        assert!(value.get("movie_id").is_none());
    }

    #[test]
    fn test_new_movie_deserializes_wire_field_names() {
        let payload = serde_json::json!({
            "country": "USA",
            "director": "Sofia Coppola",
            "duration": 102,
            "year": "2003",
            "description": "Two strangers meet in Tokyo.",
            "image": "https://example.com/lit.jpg",
            "trailerLink": "https://example.com/lit-trailer",
            "nameRU": "Трудности перевода",
            "nameEN": "Lost in Translation",
            "thumbnail": "https://example.com/lit-thumb.jpg",
            "movieId": 7
        });

        let movie: NewMovie = serde_json::from_value(payload).unwrap();
        assert_eq!(movie.trailer_link, "https://example.com/lit-trailer");
        assert_eq!(movie.name_en, "Lost in Translation");
        assert_eq!(movie.movie_id, 7);
    }
}
