//! Metrics collection and exposition.
//!
//! # Metrics
//! - `customer_api_requests_total` (counter): requests by method, status, route
//! - `customer_api_request_duration_seconds` (histogram): latency by method, route
//! - `customer_api_customers` (gauge): customers in the store
//! - `customer_api_orders` (gauge): orders across all customers

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("route", route.to_string()),
    ];
    metrics::counter!("customer_api_requests_total", &labels).increment(1);

    let labels = [("method", method.to_string()), ("route", route.to_string())];
    metrics::histogram!("customer_api_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Update the store size gauges.
pub fn record_store_size(customers: usize, orders: usize) {
    metrics::gauge!("customer_api_customers").set(customers as f64);
    metrics::gauge!("customer_api_orders").set(orders as f64);
}
