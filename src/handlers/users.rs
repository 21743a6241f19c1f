//! User CRUD handlers: list, create, read, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiJson, ApiQuery, UserId};
use crate::model::{NewUser, UserRecord, UserUpdate};
use crate::response::{created_empty, ok_empty};
use crate::service::{CrudService, RequestValidator};
use crate::sql::{ListQuery, SortSpec, MAX_LIMIT};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 5;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Query string of the list endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    #[param(default = 1, minimum = 1)]
    pub page: u32,
    /// The numbers of items to return
    #[serde(default = "default_limit")]
    #[param(default = 5, minimum = 1)]
    pub limit: u32,
    /// Search string matched against first and last name
    #[serde(default)]
    pub name: String,
    /// Attribute name by which the result sorts. Default ascending order, prefix "-" indicates descending order
    #[serde(default)]
    pub sort: String,
}

impl ListParams {
    /// Check paging bounds and resolve the sort attribute.
    pub fn into_query(self) -> Result<ListQuery, AppError> {
        if self.page < 1 {
            return Err(AppError::Validation("page must be at least 1".into()));
        }
        if self.limit < 1 {
            return Err(AppError::Validation("limit must be at least 1".into()));
        }
        let sort = SortSpec::parse(&self.sort)?;
        Ok(ListQuery {
            page: self.page,
            limit: self.limit.min(MAX_LIMIT),
            name: self.name,
            sort,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/users/",
    summary = "Returns the list of all the users",
    description = "Get list of users",
    params(ListParams),
    responses(
        (status = 200, description = "Success", body = Vec<UserRecord>),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    ),
    tag = "User Details"
)]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<UserRecord>>, AppError> {
    let query = params.into_query()?;
    let rows = CrudService::list(&state.pool, &query).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/users/",
    summary = "Create a new user",
    request_body(content = NewUser, description = "Remove id as it is auto generated"),
    responses(
        (status = 201, description = "The user was successfully created",
            headers(("Location" = String, description = "Path of the created user"))),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody)
    ),
    tag = "User Details"
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_new(&body)?;
    let id = CrudService::create(&state.pool, &body).await?;
    tracing::info!(id, "user created");
    Ok(created_empty(id))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    summary = "Get the user by id",
    params(("id" = i64, Path, description = "The user id")),
    responses(
        (status = 200, description = "The user description by id", body = UserRecord),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "The user details not found")
    ),
    tag = "User Details"
)]
pub async fn read(State(state): State<AppState>, UserId(id): UserId) -> Result<Json<UserRecord>, AppError> {
    let row = CrudService::read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
    Ok(Json(row))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    summary = "Update the user by the id",
    params(("id" = i64, Path, description = "The user id")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "The user was updated"),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody),
        (status = 404, description = "The user details not found")
    ),
    tag = "User Details"
)]
pub async fn update(
    State(state): State<AppState>,
    UserId(id): UserId,
    ApiJson(body): ApiJson<UserUpdate>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_update(&body)?;
    if !CrudService::update(&state.pool, id, &body).await? {
        return Err(AppError::NotFound(format!("user {}", id)));
    }
    Ok(ok_empty())
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    summary = "Remove the user by id",
    params(("id" = i64, Path, description = "The user id")),
    responses(
        (status = 200, description = "The user was deleted"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "Resource not exists")
    ),
    tag = "User Details"
)]
pub async fn delete(State(state): State<AppState>, UserId(id): UserId) -> Result<impl IntoResponse, AppError> {
    if !CrudService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("user {}", id)));
    }
    tracing::info!(id, "user deleted");
    Ok(ok_empty())
}
