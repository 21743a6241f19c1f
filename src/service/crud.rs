//! CRUD execution against the `userDetails` table. One store round-trip per call.

use crate::error::AppError;
use crate::model::{NewUser, UserRecord, UserUpdate};
use crate::sql::{delete, insert, select_by_id, select_list, update, ListQuery, QueryBuf};
use sqlx::SqlitePool;

pub struct CrudService;

impl CrudService {
    /// List records matching the name filter, in the requested order, one page at a time.
    pub async fn list(pool: &SqlitePool, list: &ListQuery) -> Result<Vec<UserRecord>, AppError> {
        let q = select_list(list);
        Self::fetch_all(pool, &q).await
    }

    /// Fetch one record by id. Returns None when absent.
    pub async fn read(pool: &SqlitePool, id: i64) -> Result<Option<UserRecord>, AppError> {
        let q = select_by_id(id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, UserRecord>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(pool).await?)
    }

    /// Insert one record. Returns the id assigned by the store.
    pub async fn create(pool: &SqlitePool, user: &NewUser) -> Result<i64, AppError> {
        let q = insert(user);
        let result = Self::execute(pool, &q).await?;
        Ok(result.last_insert_rowid())
    }

    /// Update first_name, last_name and age. Returns whether a row matched.
    pub async fn update(pool: &SqlitePool, id: i64, changes: &UserUpdate) -> Result<bool, AppError> {
        let q = update(id, changes);
        let result = Self::execute(pool, &q).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete one record by id. Returns whether a row was removed.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let q = delete(id);
        let result = Self::execute(pool, &q).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch_all(pool: &SqlitePool, q: &QueryBuf) -> Result<Vec<UserRecord>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, UserRecord>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(pool).await?)
    }

    async fn execute(pool: &SqlitePool, q: &QueryBuf) -> Result<sqlx::sqlite::SqliteQueryResult, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.execute(pool).await?)
    }
}
