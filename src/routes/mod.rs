//! Route tables: user CRUD, operational probes, API documentation.

pub mod common;
pub mod docs;
pub mod users;
pub use common::common_routes;
pub use docs::docs_routes;
pub use users::user_routes;
