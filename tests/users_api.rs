//! End-to-end tests: the full router against an in-memory SQLite store.

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;
use user_details_api::{build_app, ensure_user_table, AppState, NewUser, UserRecord};

struct TestApp {
    router: Router,
    pool: SqlitePool,
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

async fn test_app() -> TestApp {
    // One connection, never recycled: each new in-memory connection would be an empty database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    ensure_user_table(&pool).await.expect("create table");
    TestApp {
        router: build_app(AppState::new(pool.clone())),
        pool,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        let res = self.router.clone().oneshot(req).await.expect("response");
        let status = res.status();
        let headers = res.headers().clone();
        let body = to_bytes(res.into_body(), usize::MAX).await.expect("body bytes");
        TestResponse { status, headers, body }
    }

    /// POST a user and return the id from the `Location` header.
    async fn create(&self, user: &NewUser) -> i64 {
        let res = self
            .send(Method::POST, "/api/users/", Some(serde_json::to_value(user).unwrap()))
            .await;
        assert_eq!(res.status, StatusCode::CREATED);
        let location = res.headers.get(header::LOCATION).expect("location").to_str().unwrap();
        location
            .strip_prefix("/api/users/")
            .expect("users location")
            .parse()
            .expect("integer id")
    }

    async fn count(&self) -> i64 {
        sqlx::query_scalar(r#"SELECT COUNT(*) FROM "userDetails""#)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

fn user(first: &str, last: &str, age: i64) -> NewUser {
    NewUser {
        first_name: first.into(),
        last_name: last.into(),
        company_name: "Warner Bros".into(),
        city: "Philadelphia".into(),
        state: "Pennsylvania".into(),
        zip: 19093,
        email: format!("{}@example.com", first.to_lowercase()),
        web: "http://www.example.com".into(),
        age,
    }
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("array")
        .iter()
        .map(|r| r["id"].as_i64().expect("id"))
        .collect()
}

#[tokio::test]
async fn create_then_get_returns_input_plus_id() {
    let app = test_app().await;
    let body = json!({
        "first_name": "Ann", "last_name": "Lee", "company_name": "X", "city": "Y",
        "state": "Z", "zip": 1, "email": "a@b.com", "web": "http://b.com", "age": 30
    });
    let res = app.send(Method::POST, "/api/users/", Some(body.clone())).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json(), json!({}));
    let location = res.headers.get(header::LOCATION).unwrap().to_str().unwrap().to_string();

    let res = app.send(Method::GET, &location, None).await;
    assert_eq!(res.status, StatusCode::OK);
    let record: UserRecord = serde_json::from_slice(&res.body).unwrap();
    let input: NewUser = serde_json::from_value(body).unwrap();
    assert_eq!(record, input.into_record(record.id));
    assert!(res.json()["id"].is_i64());
}

#[tokio::test]
async fn get_missing_is_404_with_empty_body() {
    let app = test_app().await;
    let res = app.send(Method::GET, "/api/users/99999", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.is_empty());
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = test_app().await;
    let id = app.create(&user("Will", "Smith", 54)).await;

    let res = app.send(Method::DELETE, &format!("/api/users/{id}"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({}));

    let res = app.send(Method::GET, &format!("/api/users/{id}"), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.send(Method::DELETE, &format!("/api/users/{id}"), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.is_empty());
}

#[tokio::test]
async fn put_on_missing_id_is_404_and_creates_nothing() {
    let app = test_app().await;
    let res = app
        .send(
            Method::PUT,
            "/api/users/42",
            Some(json!({ "first_name": "Will", "last_name": "Smith", "age": 50 })),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.is_empty());
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn put_changes_only_names_and_age() {
    let app = test_app().await;
    let original = user("Will", "Smith", 54);
    let id = app.create(&original).await;

    let res = app
        .send(
            Method::PUT,
            &format!("/api/users/{id}"),
            Some(json!({
                "first_name": "Jaden", "last_name": "Smyth", "age": 25,
                "city": "Elsewhere", "zip": 1
            })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({}));

    let res = app.send(Method::GET, &format!("/api/users/{id}"), None).await;
    let record: UserRecord = serde_json::from_slice(&res.body).unwrap();
    let expected = UserRecord {
        first_name: "Jaden".into(),
        last_name: "Smyth".into(),
        age: 25,
        ..original.into_record(id)
    };
    assert_eq!(record, expected);
}

#[tokio::test]
async fn list_paginates_with_defaults() {
    let app = test_app().await;
    let mut created = Vec::new();
    for i in 0..12 {
        created.push(app.create(&user(&format!("User{i}"), "Doe", 20 + i)).await);
    }

    let res = app.send(Method::GET, "/api/users/", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(ids(&res.json()), created[0..5]);

    let res = app.send(Method::GET, "/api/users/?page=2&limit=5", None).await;
    assert_eq!(ids(&res.json()), created[5..10]);

    let res = app.send(Method::GET, "/api/users/?page=3&limit=5", None).await;
    assert_eq!(ids(&res.json()), created[10..12]);

    let res = app.send(Method::GET, "/api/users/?page=9", None).await;
    assert_eq!(res.json(), json!([]));
}

#[tokio::test]
async fn oversized_limit_pages_by_the_capped_size() {
    let app = test_app().await;
    let mut tx = app.pool.begin().await.unwrap();
    for i in 0..1005 {
        sqlx::query(
            r#"INSERT INTO "userDetails" (first_name, last_name, company_name, city, state, zip, email, web, age)
               VALUES (?1, 'Doe', 'X', 'Y', 'Z', 1, 'a@b.com', 'http://b.com', 30)"#,
        )
        .bind(format!("User{i}"))
        .execute(&mut *tx)
        .await
        .unwrap();
    }
    tx.commit().await.unwrap();

    let res = app.send(Method::GET, "/api/users/?limit=2000", None).await;
    let first = ids(&res.json());
    assert_eq!(first.len(), 1000);

    let res = app.send(Method::GET, "/api/users/?page=2&limit=2000", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let second = ids(&res.json());
    assert_eq!(second.len(), 5);
    assert_eq!(second[0], first[999] + 1);
}

#[tokio::test]
async fn list_filters_on_first_or_last_name_case_sensitively() {
    let app = test_app().await;
    let will = app.create(&user("Will", "Smith", 54)).await;
    let smithy = app.create(&user("Smithers", "Waylon", 60)).await;
    app.create(&user("Anna", "Goldsmith", 33)).await;
    app.create(&user("Ann", "Lee", 30)).await;

    let res = app.send(Method::GET, "/api/users/?name=Smith&limit=10", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(ids(&res.json()), vec![will, smithy]);

    let res = app.send(Method::GET, "/api/users/?name=zzz", None).await;
    assert_eq!(res.json(), json!([]));
}

#[tokio::test]
async fn list_sorts_by_column_in_both_directions() {
    let app = test_app().await;
    let old = app.create(&user("Old", "Timer", 80)).await;
    let young = app.create(&user("Young", "Blood", 18)).await;
    let mid = app.create(&user("Mid", "Life", 45)).await;

    let res = app.send(Method::GET, "/api/users/?sort=age", None).await;
    assert_eq!(ids(&res.json()), vec![young, mid, old]);

    let res = app.send(Method::GET, "/api/users/?sort=-age", None).await;
    assert_eq!(ids(&res.json()), vec![old, mid, young]);

    let res = app.send(Method::GET, "/api/users/?sort=last_name", None).await;
    assert_eq!(ids(&res.json()), vec![young, mid, old]);
}

#[tokio::test]
async fn list_rejects_bad_query_parameters() {
    let app = test_app().await;
    for uri in [
        "/api/users/?sort=password",
        "/api/users/?sort=-",
        "/api/users/?page=abc",
        "/api/users/?limit=-1",
        "/api/users/?page=0",
        "/api/users/?limit=0",
    ] {
        let res = app.send(Method::GET, uri, None).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(res.json()["error"]["code"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn filter_input_is_data_not_sql() {
    let app = test_app().await;
    app.create(&user("Will", "Smith", 54)).await;

    let res = app
        .send(Method::GET, "/api/users/?name=%27%20OR%201%3D1%20--", None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!([]));

    let res = app.send(Method::GET, "/api/users/?name=%25", None).await;
    assert_eq!(res.json(), json!([]));
    assert_eq!(app.count().await, 1);
}

#[tokio::test]
async fn create_rejects_missing_or_invalid_fields() {
    let app = test_app().await;
    let missing_age = json!({
        "first_name": "Ann", "last_name": "Lee", "company_name": "X", "city": "Y",
        "state": "Z", "zip": 1, "email": "a@b.com", "web": "http://b.com"
    });
    let res = app.send(Method::POST, "/api/users/", Some(missing_age)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let wrong_type = json!({
        "first_name": "Ann", "last_name": "Lee", "company_name": "X", "city": "Y",
        "state": "Z", "zip": "one", "email": "a@b.com", "web": "http://b.com", "age": 30
    });
    let res = app.send(Method::POST, "/api/users/", Some(wrong_type)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let bad_email = json!({
        "first_name": "Ann", "last_name": "Lee", "company_name": "X", "city": "Y",
        "state": "Z", "zip": 1, "email": "nope", "web": "http://b.com", "age": 30
    });
    let res = app.send(Method::POST, "/api/users/", Some(bad_email)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"]["code"], "validation_error");

    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let app = test_app().await;
    let res = app.send(Method::GET, "/api/users/abc", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let res = app.send(Method::DELETE, "/api/users/1.5", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn collection_answers_without_trailing_slash() {
    let app = test_app().await;
    let res = app
        .send(Method::POST, "/api/users", Some(serde_json::to_value(user("Ann", "Lee", 30)).unwrap()))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let res = app.send(Method::GET, "/api/users", None).await;
    assert_eq!(res.json().as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn probes_and_docs_are_served() {
    let app = test_app().await;

    let res = app.send(Method::GET, "/health", None).await;
    assert_eq!(res.json(), json!({ "status": "ok" }));

    let res = app.send(Method::GET, "/ready", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["database"], "ok");

    let res = app.send(Method::GET, "/version", None).await;
    assert_eq!(res.json()["name"], "user-details-api");

    let res = app.send(Method::GET, "/openapi.json", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let doc = res.json();
    assert_eq!(doc["info"]["title"], "Data Peace Storage API");
    assert!(doc["paths"]["/api/users/{id}"]["delete"].is_object());

    let res = app.send(Method::GET, "/api-docs", None).await;
    assert!(res.status.is_success() || res.status.is_redirection(), "{}", res.status);
}

#[tokio::test]
async fn ready_reports_closed_store() {
    let app = test_app().await;
    app.pool.close().await;
    let res = app.send(Method::GET, "/ready", None).await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.json()["status"], "degraded");
}
