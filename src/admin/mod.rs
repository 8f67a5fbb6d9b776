pub mod auth;
pub mod handlers;

use axum::http::Method;

use crate::http::Handler;
use crate::routing::{RouteError, Router};
use self::handlers::*;

/// Register the admin routes. The Basic-auth gate in `auth` runs before these resolve.
pub fn register_routes(router: &mut Router<Handler>) -> Result<(), RouteError> {
    router
        .register(Method::GET, "/admin/?", get_info)?
        .register(Method::GET, "/admin/status/?", get_status)?;
    Ok(())
}
