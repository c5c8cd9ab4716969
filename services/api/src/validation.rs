//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::models::NewMovie;

/// Validate a user display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Name is required".to_string());
    }

    if name.chars().count() < 2 {
        return Err("Name must be at least 2 characters long".to_string());
    }

    if name.chars().count() > 30 {
        return Err("Name must be at most 30 characters long".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password (signup only; signin merely requires non-empty fields)
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate an http(s) URL field
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL is required".to_string());
    }

    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = URL_REGEX.get_or_init(|| {
        Regex::new(r"^https?://[a-zA-Z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+$")
            .expect("Failed to compile URL regex")
    });

    if !regex.is_match(url) {
        return Err("Invalid URL format".to_string());
    }

    Ok(())
}

/// Validate a movie creation payload
pub fn validate_movie(movie: &NewMovie) -> Result<(), String> {
    let required_text = [
        ("country", &movie.country),
        ("director", &movie.director),
        ("year", &movie.year),
        ("description", &movie.description),
        ("nameRU", &movie.name_ru),
        ("nameEN", &movie.name_en),
    ];

    for (field, value) in required_text {
        if value.trim().is_empty() {
            return Err(format!("Field '{}' is required", field));
        }
    }

    validate_url(&movie.image).map_err(|_| "Field 'image' must be a valid URL".to_string())?;
    validate_url(&movie.trailer_link)
        .map_err(|_| "Field 'trailerLink' must be a valid URL".to_string())?;
    validate_url(&movie.thumbnail)
        .map_err(|_| "Field 'thumbnail' must be a valid URL".to_string())?;

    if movie.duration <= 0 {
        return Err("Field 'duration' must be a positive number".to_string());
    }

    if movie.movie_id <= 0 {
        return Err("Field 'movieId' must be a positive number".to_string());
    }

    Ok(())
}
