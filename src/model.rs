//! User details record and the request bodies that create or change it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Column names of `userDetails`, in table order. The only identifiers the SQL builder will emit.
pub const USER_COLUMNS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "company_name",
    "city",
    "state",
    "zip",
    "email",
    "web",
    "age",
];

/// One row of `userDetails`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "first_name": "Will",
    "last_name": "Smith",
    "company_name": "Warner Bros",
    "city": "Philadelphia",
    "state": "Pennsylvania",
    "zip": 19093,
    "email": "willsmith@gmail.com",
    "web": "http://www.willsmith.com",
    "age": 54
}))]
pub struct UserRecord {
    /// The auto-generated id of the user
    pub id: i64,
    /// First name of the User
    pub first_name: String,
    /// Last name of the User
    pub last_name: String,
    /// Company name of the User
    pub company_name: String,
    /// City of the User
    pub city: String,
    /// State of the User
    pub state: String,
    /// Zip code of the User
    pub zip: i64,
    /// Email of the User
    pub email: String,
    /// Website of the User
    pub web: String,
    /// Age of the User
    pub age: i64,
}

/// Create body: every field except id, all required.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "first_name": "Will",
    "last_name": "Smith",
    "company_name": "Warner Bros",
    "city": "Philadelphia",
    "state": "Pennsylvania",
    "zip": 19093,
    "email": "willsmith@gmail.com",
    "web": "http://www.willsmith.com",
    "age": 54
}))]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub city: String,
    pub state: String,
    pub zip: i64,
    pub email: String,
    pub web: String,
    pub age: i64,
}

impl NewUser {
    /// The stored record this body becomes once the store assigns `id`.
    pub fn into_record(self, id: i64) -> UserRecord {
        UserRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            company_name: self.company_name,
            city: self.city,
            state: self.state,
            zip: self.zip,
            email: self.email,
            web: self.web,
            age: self.age,
        }
    }
}

/// Update body. Only these three columns are ever changed after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "first_name": "Will", "last_name": "Smith", "age": 50 }))]
pub struct UserUpdate {
    /// First name of the User
    pub first_name: String,
    /// Last name of the User
    pub last_name: String,
    /// Age of the User
    pub age: i64,
}
