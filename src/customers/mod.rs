//! Customer and order resources.

pub mod handlers;

use axum::http::Method;

use crate::http::Handler;
use crate::routing::{RouteError, Router};
use self::handlers::*;

/// Register the customer routes. Order matters: see `Router::resolve`.
pub fn register_routes(router: &mut Router<Handler>) -> Result<(), RouteError> {
    router
        .register(Method::GET, "/customers/?", list_customers)?
        .register(Method::GET, "/customers/([^/]+)/?", get_customer)?
        .register(Method::POST, "/customers/?", create_customer)?
        .register(Method::GET, "/customers/([^/]+)/orders/?", list_orders)?
        .register(Method::POST, "/customers/([^/]+)/orders/?", create_order)?
        .register(Method::GET, "/customers/([^/]+)/orders/([^/]+)/?", get_order)?;
    Ok(())
}
