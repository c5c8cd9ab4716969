//! End-to-end API flow tests
//!
//! These tests drive the full router against a running PostgreSQL
//! instance reachable through `DATABASE_URL`; migrations are applied
//! before the flow starts. They cover the ownership rules: owner-scoped
//! listing, foreign deletes rejected with the record intact, and the
//! create-list-delete round trip.

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use common::database::{DatabaseConfig, init_pool};
use tower::ServiceExt;
use uuid::Uuid;

use api::{
    jwt::{JwtConfig, JwtService},
    repositories::{MovieRepository, UserRepository},
    routes::create_router,
    state::AppState,
};

async fn send(
    app: Router,
    request: Request<Body>,
) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, headers, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

fn get_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn delete_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn signup_body(name: &str, email: &str, password: &str) -> String {
    serde_json::json!({"name": name, "email": email, "password": password}).to_string()
}

fn signin_body(email: &str, password: &str) -> String {
    serde_json::json!({"email": email, "password": password}).to_string()
}

fn movie_body() -> String {
    serde_json::json!({
        "country": "France",
        "director": "Jean-Pierre Jeunet",
        "duration": 122,
        "year": "2001",
        "description": "A shy waitress decides to help those around her.",
        "image": "https://example.com/amelie.jpg",
        "trailerLink": "https://example.com/amelie-trailer",
        "nameRU": "Амели",
        "nameEN": "Amelie",
        "thumbnail": "https://example.com/amelie-thumb.jpg",
        "movieId": 42
    })
    .to_string()
}

async fn signin(app: &Router, email: &str, password: &str) -> String {
    let (status, headers, body) = send(
        app.clone(),
        json_request("POST", "/signin", None, signin_body(email, password)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The token also travels as an httpOnly cookie
    let cookie = headers
        .get(header::SET_COOKIE)
        .expect("missing Set-Cookie header")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("jwt="));
    assert!(cookie.contains("HttpOnly"));

    body["token"].as_str().expect("missing token").to_string()
}

fn list_contains(list: &serde_json::Value, id: &serde_json::Value) -> bool {
    list.as_array()
        .expect("expected a JSON array")
        .iter()
        .any(|movie| &movie["id"] == id)
}

/// Full ownership-scoped movie flow over the real store
#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_ownership_scoped_movie_flow() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState {
        db_pool: pool.clone(),
        jwt_service: JwtService::new(JwtConfig {
            secret: "flow-test-secret".to_string(),
            token_expiry: 604800,
        }),
        user_repository: UserRepository::new(pool.clone()),
        movie_repository: MovieRepository::new(pool),
    };
    let app = create_router(state);

    let suffix = Uuid::new_v4().simple().to_string();
    let email_a = format!("owner-{}@example.com", suffix);
    let email_b = format!("other-{}@example.com", suffix);

    // Signup returns the public fields and never the password
    let (status, _, body) = send(
        app.clone(),
        json_request("POST", "/signup", None, signup_body("Owner", &email_a, "owner-password")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], email_a.as_str());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // Duplicate email conflicts regardless of password
    let (status, _, _) = send(
        app.clone(),
        json_request("POST", "/signup", None, signup_body("Owner", &email_a, "different-password")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Wrong password and unknown email are indistinguishable
    let (status_wrong, _, body_wrong) = send(
        app.clone(),
        json_request("POST", "/signin", None, signin_body(&email_a, "wrong-password")),
    )
    .await;
    let (status_unknown, _, body_unknown) = send(
        app.clone(),
        json_request(
            "POST",
            "/signin",
            None,
            signin_body(&format!("nobody-{}@example.com", suffix), "owner-password"),
        ),
    )
    .await;
    assert_eq!(status_wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(status_unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(body_wrong, body_unknown);

    let (status, _, _) = send(
        app.clone(),
        json_request("POST", "/signup", None, signup_body("Other", &email_b, "other-password")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let token_a = signin(&app, &email_a, "owner-password").await;
    let token_b = signin(&app, &email_b, "other-password").await;

    // Create a movie as A, authenticating through the cookie
    let create_request = Request::builder()
        .method("POST")
        .uri("/movies")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, format!("jwt={}", token_a))
        .body(Body::from(movie_body()))
        .unwrap();
    let (status, _, movie) = send(app.clone(), create_request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(movie["nameEN"], "Amelie");
    assert_eq!(movie["trailerLink"], "https://example.com/amelie-trailer");
    assert_eq!(movie["movieId"], 42);
    let movie_id = movie["id"].clone();
    let movie_path = format!("/movies/{}", movie_id.as_str().unwrap());

    // A sees the movie; B does not
    let (status, _, list_a) = send(app.clone(), get_request("/movies", &token_a)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list_contains(&list_a, &movie_id));

    let (status, _, list_b) = send(app.clone(), get_request("/movies", &token_b)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!list_contains(&list_b, &movie_id));

    // Foreign delete is Forbidden and leaves the record intact
    let (status, _, _) = send(app.clone(), delete_request(&movie_path, &token_b)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, _, list_a) = send(app.clone(), get_request("/movies", &token_a)).await;
    assert!(list_contains(&list_a, &movie_id));

    // Deleting a nonexistent id is NotFound
    let (status, _, _) = send(
        app.clone(),
        delete_request(&format!("/movies/{}", Uuid::new_v4()), &token_a),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Owner delete returns the deleted record and the list no longer has it
    let (status, _, deleted) = send(app.clone(), delete_request(&movie_path, &token_a)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], movie_id);

    let (_, _, list_a) = send(app.clone(), get_request("/movies", &token_a)).await;
    assert!(!list_contains(&list_a, &movie_id));

    // Signout clears the cookie; a request without it is Unauthorized
    let (status, headers, _) = send(
        app.clone(),
        json_request("POST", "/signout", Some(&token_a), String::new()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let cleared = headers
        .get(header::SET_COOKIE)
        .expect("missing Set-Cookie header")
        .to_str()
        .unwrap();
    assert!(cleared.starts_with("jwt=;"));
    assert!(cleared.contains("Max-Age=0"));

    let bare_request = Request::builder()
        .method("GET")
        .uri("/movies")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(app.clone(), bare_request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}
