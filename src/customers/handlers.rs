use axum::http::StatusCode;
use axum::response::Response;

use crate::error::{ApiError, ApiResult};
use crate::http::response::{created, json};
use crate::http::{AppState, RouteRequest};
use crate::store::{NewCustomer, NewOrder};

pub fn list_customers(state: &AppState, _req: RouteRequest) -> ApiResult<Response> {
    Ok(json(StatusCode::OK, &state.store.list_customers()))
}

pub fn get_customer(state: &AppState, req: RouteRequest) -> ApiResult<Response> {
    let customer = state
        .store
        .get_customer(req.param(0))
        .map_err(ApiError::customer_lookup)?;
    Ok(json(StatusCode::OK, &customer))
}

pub fn create_customer(state: &AppState, req: RouteRequest) -> ApiResult<Response> {
    let body: NewCustomer = req.json()?;
    let customer = state.store.create_customer(body.name, body.age);
    Ok(created(&req.path, &customer.id, &customer))
}

pub fn list_orders(state: &AppState, req: RouteRequest) -> ApiResult<Response> {
    let orders = state
        .store
        .list_orders(req.param(0))
        .map_err(ApiError::order_lookup)?;
    Ok(json(StatusCode::OK, &orders))
}

pub fn create_order(state: &AppState, req: RouteRequest) -> ApiResult<Response> {
    let body: NewOrder = req.json()?;
    let order = state
        .store
        .create_order(req.param(0), body.product, body.price, body.amount)
        .map_err(ApiError::order_lookup)?;
    Ok(created(&req.path, &order.id, &order))
}

/// A missing customer (409) is reported before a missing order (404).
pub fn get_order(state: &AppState, req: RouteRequest) -> ApiResult<Response> {
    let order = state
        .store
        .get_order(req.param(0), req.param(1))
        .map_err(ApiError::order_lookup)?;
    Ok(json(StatusCode::OK, &order))
}
