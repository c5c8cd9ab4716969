//! Movie repository for database operations
//!
//! All reads are scoped by owner where the HTTP surface requires it; the
//! ownership check for deletion lives in the handler so it strictly
//! precedes the DELETE statement.

use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{Movie, NewMovie};

const MOVIE_COLUMNS: &str = "id, owner, country, director, duration, year, description, \
     image, trailer_link, name_ru, name_en, thumbnail, movie_id, created_at";

/// Movie repository
#[derive(Clone)]
pub struct MovieRepository {
    pool: PgPool,
}

impl MovieRepository {
    /// Create a new movie repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all movies saved by the given owner, newest first
    pub async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Movie>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {MOVIE_COLUMNS}
            FROM movies
            WHERE owner = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_movie).collect())
    }

    /// Persist a new movie with the caller as owner
    pub async fn create(&self, owner: Uuid, new_movie: &NewMovie) -> Result<Movie, sqlx::Error> {
        info!("Saving movie {} for user {}", new_movie.movie_id, owner);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO movies (owner, country, director, duration, year, description,
                                image, trailer_link, name_ru, name_en, thumbnail, movie_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(&new_movie.country)
        .bind(&new_movie.director)
        .bind(new_movie.duration)
        .bind(&new_movie.year)
        .bind(&new_movie.description)
        .bind(&new_movie.image)
        .bind(&new_movie.trailer_link)
        .bind(&new_movie.name_ru)
        .bind(&new_movie.name_en)
        .bind(&new_movie.thumbnail)
        .bind(new_movie.movie_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(map_movie(&row))
    }

    /// Find a movie by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {MOVIE_COLUMNS}
            FROM movies
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_movie))
    }

    /// Delete a movie by ID, returning the deleted record
    ///
    /// Returns `None` when the record was already gone (lost race).
    pub async fn delete(&self, id: Uuid) -> Result<Option<Movie>, sqlx::Error> {
        info!("Deleting movie {}", id);

        let row = sqlx::query(&format!(
            r#"
            DELETE FROM movies
            WHERE id = $1
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_movie))
    }
}

fn map_movie(row: &PgRow) -> Movie {
    Movie {
        id: row.get("id"),
        owner: row.get("owner"),
        country: row.get("country"),
        director: row.get("director"),
        duration: row.get("duration"),
        year: row.get("year"),
        description: row.get("description"),
        image: row.get("image"),
        trailer_link: row.get("trailer_link"),
        name_ru: row.get("name_ru"),
        name_en: row.get("name_en"),
        thumbnail: row.get("thumbnail"),
        movie_id: row.get("movie_id"),
        created_at: row.get("created_at"),
    }
}
