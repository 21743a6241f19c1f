//! User details API: CRUD over one SQLite table with generated OpenAPI docs.

pub mod app;
pub mod config;
pub mod doc;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use app::build_app;
pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use model::{NewUser, UserRecord, UserUpdate};
pub use service::CrudService;
pub use state::AppState;
pub use store::{connect, ensure_user_table};
