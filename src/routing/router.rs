//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store registered routes in registration order
//! - Resolve a method + path to a handler and its path parameters
//! - Report "method not allowed" and "not found" explicitly
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) linear scan (acceptable for typical route counts)
//! - Explicit outcomes rather than a silent default handler

use axum::http::Method;

use crate::routing::matcher::PathPattern;

/// Error raised while building the route table.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("invalid route pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A registered (method, pattern, handler) triple.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub method: Method,
    pub pattern: PathPattern,
    pub handler: H,
}

/// Positional path parameters captured by a route pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<String>);

impl PathParams {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Parameter at zero-based `index`, if the pattern captured that many.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Outcome of resolving a request against the route table.
#[derive(Debug)]
pub enum Resolution<'a, H> {
    /// A route matched both path and method.
    Dispatch {
        route: &'a Route<H>,
        params: PathParams,
    },
    /// Some route matched the path, none with this method.
    MethodNotAllowed { allowed: Vec<Method> },
    /// No route matched the path.
    NotFound,
}

/// An ordered, append-only route table.
#[derive(Debug, Clone)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Append a route. Registration order is the match precedence.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        let pattern = PathPattern::new(pattern).map_err(|source| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        tracing::debug!(method = %method, pattern = %pattern.as_str(), "Route registered");
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        Ok(self)
    }

    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    /// Resolve `method` and `path` to a dispatch or a routing failure.
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution<'_, H> {
        let mut allowed = Vec::new();

        for route in &self.routes {
            if route.method != *method {
                if route.pattern.is_match(path) {
                    allowed.push(route.method.clone());
                }
                continue;
            }
            if let Some(captures) = route.pattern.captures(path) {
                return Resolution::Dispatch {
                    route,
                    params: PathParams::new(captures),
                };
            }
        }

        if allowed.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::MethodNotAllowed { allowed }
        }
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_routes() -> Router<&'static str> {
        let mut router = Router::new();
        router
            .register(Method::GET, "/customers/?", "list_customers")
            .unwrap()
            .register(Method::GET, "/customers/([^/]+)/?", "get_customer")
            .unwrap()
            .register(Method::POST, "/customers/?", "create_customer")
            .unwrap()
            .register(Method::GET, "/customers/([^/]+)/orders/?", "list_orders")
            .unwrap()
            .register(Method::POST, "/customers/([^/]+)/orders/?", "create_order")
            .unwrap()
            .register(Method::GET, "/customers/([^/]+)/orders/([^/]+)/?", "get_order")
            .unwrap();
        router
    }

    fn dispatched(resolution: Resolution<'_, &'static str>) -> (&'static str, PathParams) {
        match resolution {
            Resolution::Dispatch { route, params } => (route.handler, params),
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_route_captures_in_order() {
        let router = customer_routes();

        let (handler, params) = dispatched(router.resolve(&Method::GET, "/customers/42/orders/7"));

        assert_eq!(handler, "get_order");
        assert_eq!(params.as_slice(), ["42", "7"]);
        assert_eq!(params.get(0), Some("42"));
        assert_eq!(params.get(1), Some("7"));
        assert_eq!(params.get(2), None);
    }

    #[test]
    fn test_method_selects_between_shared_patterns() {
        let router = customer_routes();

        let (get, _) = dispatched(router.resolve(&Method::GET, "/customers/"));
        let (post, params) = dispatched(router.resolve(&Method::POST, "/customers"));

        assert_eq!(get, "list_customers");
        assert_eq!(post, "create_customer");
        assert!(params.is_empty());
    }

    #[test]
    fn test_method_not_allowed_lists_path_methods() {
        let router = customer_routes();

        match router.resolve(&Method::POST, "/customers/42") {
            Resolution::MethodNotAllowed { allowed } => assert_eq!(allowed, vec![Method::GET]),
            other => panic!("expected 405, got {other:?}"),
        }

        match router.resolve(&Method::DELETE, "/customers/42/orders") {
            Resolution::MethodNotAllowed { allowed } => {
                assert_eq!(allowed, vec![Method::GET, Method::POST])
            }
            other => panic!("expected 405, got {other:?}"),
        }
    }

    #[test]
    fn test_unregistered_path_is_not_found() {
        let router = customer_routes();

        assert!(matches!(router.resolve(&Method::GET, "/products"), Resolution::NotFound));
        assert!(matches!(
            router.resolve(&Method::GET, "/customers/42/orders/7/extra"),
            Resolution::NotFound
        ));
        assert!(matches!(router.resolve(&Method::POST, "/"), Resolution::NotFound));
    }

    #[test]
    fn test_registration_order_breaks_ties() {
        let mut router = Router::new();
        router
            .register(Method::GET, "/items/([^/]+)", "by_id")
            .unwrap()
            .register(Method::GET, "/items/special", "special")
            .unwrap();

        let (handler, params) = dispatched(router.resolve(&Method::GET, "/items/special"));

        assert_eq!(handler, "by_id");
        assert_eq!(params.as_slice(), ["special"]);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let mut router: Router<()> = Router::new();
        let err = router.register(Method::GET, "/broken/(", ()).unwrap_err();
        assert!(err.to_string().contains("/broken/("));
        assert!(router.routes().is_empty());
    }
}
