//! Response helpers. Successful writes answer with an empty JSON object.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

/// Base path of the user routes, used to build `Location` headers.
pub const USERS_PATH: &str = "/api/users";

fn empty_object() -> Json<Value> {
    Json(Value::Object(Map::new()))
}

/// 200 with `{}`.
pub fn ok_empty() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, empty_object())
}

/// 201 with `{}` and `Location` pointing at the new record.
pub fn created_empty(id: i64) -> Response {
    let mut res = (StatusCode::CREATED, empty_object()).into_response();
    if let Ok(location) = HeaderValue::from_str(&format!("{}/{}", USERS_PATH, id)) {
        res.headers_mut().insert(header::LOCATION, location);
    }
    res
}
