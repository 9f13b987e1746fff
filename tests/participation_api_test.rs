use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value as JsonValue};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use opportunity_board::utils::{crypto::hash_password, token::issue_token};

async fn setup_app() -> Option<(Router, PgPool)> {
    dotenvy::dotenv().ok();
    let Ok(database_url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database-backed test");
        return None;
    };
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    if env::var("JWT_SECRET").is_err() {
        env::set_var("JWT_SECRET", "test_secret_key");
    }
    let _ = opportunity_board::config::init_config();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let state = opportunity_board::AppState::new(pool.clone());
    Some((opportunity_board::routes::api_router(state), pool))
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register_user(app: &Router, name: &str) -> String {
    let email = format!("{}_{}@example.com", name.to_lowercase(), Uuid::new_v4());
    let payload = json!({ "name": name, "email": email, "password": "abc123" });
    let (status, body) = call(app, "POST", "/user/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().expect("token").to_string()
}

async fn seed_admin(pool: &PgPool) -> String {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, 'admin') RETURNING id",
    )
    .bind("Site Admin")
    .bind(format!("admin_{}@example.com", Uuid::new_v4()))
    .bind(hash_password("admin123").expect("hash"))
    .fetch_one(pool)
    .await
    .expect("seed admin");
    issue_token(id, "admin").expect("admin token")
}

#[tokio::test]
async fn scholarship_apply_contract() {
    let Some((app, pool)) = setup_app().await else {
        return;
    };

    let run = Uuid::new_v4();
    let owner_token = register_user(&app, "Olive").await;
    let admin_token = seed_admin(&pool).await;

    let deadline = (Utc::now() + Duration::days(120)).to_rfc3339();
    let (status, body) = call(
        &app,
        "POST",
        "/scholarships",
        Some(&owner_token),
        Some(json!({
            "title": format!("Global Excellence Grant {}", run),
            "description": "A fully funded graduate scholarship covering tuition and a living stipend for outstanding international applicants.",
            "provider": { "name": "TU Berlin", "type": "University" },
            "amount": { "value": "25000", "is_full_ride": false },
            "qualifications": { "education_level": "Master", "min_gpa": "3.0" },
            "fields_of_study": ["Engineering", "  Computer Science "],
            "application_process": {
                "deadline": deadline,
                "link": "https://example.org/apply",
                "required_docs": ["transcript", "motivation letter"]
            },
            "host_country": "Germany",
            "total_slots": 5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_verified"], false);
    assert_eq!(body["applicant_count"], 0);
    assert_eq!(body["provider"]["type"], "University");
    // Tags are stored trimmed and lowercased.
    assert_eq!(
        body["fields_of_study"],
        json!(["engineering", "computer science"])
    );
    let scholarship_id = body["id"].as_str().expect("id").to_string();

    let (status, body) = call(&app, "GET", "/scholarships/recent", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let recent = body.as_array().expect("recent");
    assert!(recent.iter().any(|s| s["id"] == scholarship_id.as_str()));

    let applicant_token = register_user(&app, "Pavel").await;
    let (status, body) = call(
        &app,
        "POST",
        &format!("/scholarships/{}/apply", scholarship_id),
        Some(&applicant_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "You cannot apply to this scholarship because it is not verified."
    );

    let (status, _) = call(
        &app,
        "POST",
        &format!("/admin/scholarships/{}", scholarship_id),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &app,
        "POST",
        &format!("/scholarships/{}/apply", scholarship_id),
        Some(&applicant_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applicant_count"], 1);

    let (status, body) = call(
        &app,
        "POST",
        &format!("/scholarships/{}/apply", scholarship_id),
        Some(&applicant_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You have already applied to this scholarship");

    // Deactivation closes the window for everyone else.
    let (status, body) = call(
        &app,
        "PUT",
        &format!("/scholarships/{}", scholarship_id),
        Some(&owner_token),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);

    let late_token = register_user(&app, "Quinn").await;
    let (status, body) = call(
        &app,
        "POST",
        &format!("/scholarships/{}/apply", scholarship_id),
        Some(&late_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "This scholarship is no longer active");
}

#[tokio::test]
async fn forum_registration_and_capacity() {
    let Some((app, pool)) = setup_app().await else {
        return;
    };

    let run = Uuid::new_v4();
    let owner_token = register_user(&app, "Rita").await;
    let admin_token = seed_admin(&pool).await;

    let start = Utc::now() + Duration::days(30);
    let end = start + Duration::days(1);
    let (status, body) = call(
        &app,
        "POST",
        "/forums",
        Some(&owner_token),
        Some(json!({
            "title": format!("Tech Careers Forum {}", run),
            "description": "Two days of talks and networking sessions connecting students with regional employers.",
            "location": "Tashkent",
            "start_date": start.to_rfc3339(),
            "end_date": end.to_rfc3339(),
            "organizer": { "name": "Organizing Committee", "email": "contact@techforum.uz" },
            "tags": ["Networking", "  Careers "],
            "is_virtual": false,
            "max_attendees": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_verified"], false);
    assert_eq!(body["tags"], json!(["networking", "careers"]));
    let forum_id = body["id"].as_str().expect("id").to_string();

    let first_token = register_user(&app, "Sam").await;
    let (status, body) = call(
        &app,
        "POST",
        &format!("/forums/{}/register", forum_id),
        Some(&first_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "You cannot register for this conference/forum because it is not verified."
    );

    let (status, _) = call(
        &app,
        "POST",
        &format!("/admin/forums/{}", forum_id),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &app,
        "POST",
        &format!("/forums/{}/register", forum_id),
        Some(&first_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Registration successful");
    assert_eq!(body["attendee_count"], 1);

    let (status, body) = call(
        &app,
        "POST",
        &format!("/forums/{}/register", forum_id),
        Some(&first_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already registered");

    let second_token = register_user(&app, "Tara").await;
    let (status, body) = call(
        &app,
        "POST",
        &format!("/forums/{}/register", forum_id),
        Some(&second_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attendee_count"], 2);

    let third_token = register_user(&app, "Umar").await;
    let (status, body) = call(
        &app,
        "POST",
        &format!("/forums/{}/register", forum_id),
        Some(&third_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Maximum attendees reached");

    // Unregistering is idempotent; a no-op still reports the current count.
    let (status, body) = call(
        &app,
        "POST",
        &format!("/forums/{}/unregister", forum_id),
        Some(&third_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attendee_count"], 2);

    let (status, body) = call(
        &app,
        "POST",
        &format!("/forums/{}/unregister", forum_id),
        Some(&second_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attendee_count"], 1);

    let (status, body) = call(&app, "GET", &format!("/forums/{}", forum_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let attendees = body["attendees"].as_array().expect("attendees");
    assert_eq!(attendees.len(), 1);
    assert_eq!(attendees[0]["name"], "Sam");
    assert_eq!(body["created_by"]["name"], "Rita");

    let (status, body) = call(&app, "GET", "/forums/upcoming", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let upcoming = body.as_array().expect("upcoming");
    assert!(upcoming.iter().any(|f| f["id"] == forum_id.as_str()));

    // An edit may not leave the dates out of order.
    let bad_end = (start - Duration::days(10)).to_rfc3339();
    let (status, body) = call(
        &app,
        "PUT",
        &format!("/forums/{}", forum_id),
        Some(&owner_token),
        Some(json!({ "end_date": bad_end })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "End date must be after or equal to start date."
    );

    let (status, body) = call(
        &app,
        "POST",
        &format!("/forums/{}/unregister", Uuid::new_v4()),
        Some(&first_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Conference/Forum not found");
}
