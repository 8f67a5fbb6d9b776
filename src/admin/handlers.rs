use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::error::ApiResult;
use crate::http::response::{json, message};
use crate::http::{AppState, RouteRequest};

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub customers: usize,
    pub orders: usize,
}

pub fn get_info(_state: &AppState, _req: RouteRequest) -> ApiResult<Response> {
    Ok(message(StatusCode::OK, "Hello, 世界"))
}

pub fn get_status(state: &AppState, _req: RouteRequest) -> ApiResult<Response> {
    let stats = state.store.stats();
    Ok(json(
        StatusCode::OK,
        &SystemStatus {
            version: env!("CARGO_PKG_VERSION"),
            status: "operational",
            customers: stats.customers,
            orders: stats.orders,
        },
    ))
}
