//! CrudService: user CRUD using the safe SQL builder.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::{RequestValidator, MAX_AGE, MAX_TEXT_LEN};
