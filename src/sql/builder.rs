//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for `userDetails`.

use crate::error::AppError;
use crate::model::{NewUser, UserUpdate, USER_COLUMNS};
use crate::sql::SqlValue;

/// Table holding every user record.
pub const USER_TABLE: &str = "userDetails";

/// Upper bound applied to `limit` on list queries.
pub const MAX_LIMIT: u32 = 1000;

/// Quote identifier for SQLite (safe: only from [`USER_COLUMNS`] or [`USER_TABLE`]).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_list() -> String {
    USER_COLUMNS
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter and returns its 1-based position for a `?N` placeholder.
    fn push_param(&mut self, v: impl Into<SqlValue>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Validated ORDER BY target: a known column and a direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parse `sort` as it arrives on the query string. `""` means no ordering,
    /// a leading `-` flips to descending. Unknown columns are rejected.
    pub fn parse(raw: &str) -> Result<Option<Self>, AppError> {
        if raw.is_empty() {
            return Ok(None);
        }
        let (name, direction) = match raw.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Desc),
            None => (raw, SortDirection::Asc),
        };
        let column = USER_COLUMNS
            .iter()
            .copied()
            .find(|c| *c == name)
            .ok_or_else(|| AppError::BadRequest(format!("cannot sort by unknown attribute '{}'", name)))?;
        Ok(Some(SortSpec { column, direction }))
    }
}

/// Inputs of a list query after validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub name: String,
    pub sort: Option<SortSpec>,
}

impl ListQuery {
    /// Page size actually applied, capped at [`MAX_LIMIT`].
    pub fn effective_limit(&self) -> u32 {
        self.limit.min(MAX_LIMIT)
    }

    /// Rows skipped before this page, counted in pages of [`Self::effective_limit`].
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.effective_limit())
    }
}

/// SELECT list: substring match on first or last name, optional ORDER BY, LIMIT/OFFSET.
/// `instr` keeps the match case-sensitive and treats `%` and `_` literally.
pub fn select_list(list: &ListQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = if list.name.is_empty() {
        String::new()
    } else {
        let n = q.push_param(list.name.as_str());
        format!(
            " WHERE instr({}, ?{n}) > 0 OR instr({}, ?{n}) > 0",
            quoted("first_name"),
            quoted("last_name"),
        )
    };
    let order_clause = list
        .sort
        .as_ref()
        .map(|s| format!(" ORDER BY {} {}", quoted(s.column), s.direction.as_sql()))
        .unwrap_or_default();
    let limit = i64::from(list.effective_limit());
    let offset = i64::try_from(list.offset()).unwrap_or(i64::MAX);
    let limit_ph = q.push_param(limit);
    let offset_ph = q.push_param(offset);
    q.sql = format!(
        "SELECT {} FROM {}{}{} LIMIT ?{} OFFSET ?{}",
        column_list(),
        quoted(USER_TABLE),
        where_clause,
        order_clause,
        limit_ph,
        offset_ph
    );
    q
}

/// SELECT by id.
pub fn select_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?{}",
        column_list(),
        quoted(USER_TABLE),
        quoted("id"),
        n
    );
    q
}

/// INSERT of every column except id, which the store assigns.
pub fn insert(user: &NewUser) -> QueryBuf {
    let mut q = QueryBuf::new();
    let values: [(&str, SqlValue); 9] = [
        ("first_name", user.first_name.as_str().into()),
        ("last_name", user.last_name.as_str().into()),
        ("company_name", user.company_name.as_str().into()),
        ("city", user.city.as_str().into()),
        ("state", user.state.as_str().into()),
        ("zip", user.zip.into()),
        ("email", user.email.as_str().into()),
        ("web", user.web.as_str().into()),
        ("age", user.age.into()),
    ];
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (col, val) in values {
        let n = q.push_param(val);
        cols.push(quoted(col));
        placeholders.push(format!("?{}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(USER_TABLE),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE by id: SET first_name, last_name, age only.
pub fn update(id: i64, changes: &UserUpdate) -> QueryBuf {
    let mut q = QueryBuf::new();
    let values: [(&str, SqlValue); 3] = [
        ("first_name", changes.first_name.as_str().into()),
        ("last_name", changes.last_name.as_str().into()),
        ("age", changes.age.into()),
    ];
    let mut sets = Vec::with_capacity(values.len());
    for (col, val) in values {
        let n = q.push_param(val);
        sets.push(format!("{} = ?{}", quoted(col), n));
    }
    let id_ph = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ?{}",
        quoted(USER_TABLE),
        sets.join(", "),
        quoted("id"),
        id_ph
    );
    q
}

/// DELETE by id.
pub fn delete(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("DELETE FROM {} WHERE {} = ?{}", quoted(USER_TABLE), quoted("id"), n);
    q
}
