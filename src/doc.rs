//! OpenAPI document for the REST API.
//!
//! Paths come from the `#[utoipa::path]` annotations on the handlers and
//! schemas from the model types, so the document cannot drift from the
//! routes that serve it.

use crate::error::{ErrorBody, ErrorDetail};
use crate::model::{NewUser, UserRecord, UserUpdate};
use crate::routes::common::{HealthBody, ReadyBody, VersionBody};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Data Peace Storage API",
        version = "1.0.0",
        description = "Managing the user's data"
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::handlers::users::list,
        crate::handlers::users::create,
        crate::handlers::users::read,
        crate::handlers::users::update,
        crate::handlers::users::delete,
        crate::routes::common::health,
        crate::routes::common::ready,
        crate::routes::common::version,
    ),
    components(schemas(
        UserRecord,
        NewUser,
        UserUpdate,
        ErrorBody,
        ErrorDetail,
        HealthBody,
        ReadyBody,
        VersionBody
    )),
    tags(
        (name = "User Details", description = "The user details managing API"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
