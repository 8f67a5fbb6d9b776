//! The nested in-memory store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::observability::metrics;
use crate::store::id::IdGenerator;
use crate::store::model::{Customer, Order};

/// Lookup failures. Customer absence and order absence are reported separately
/// so callers can map them to different responses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("customer not found: {0}")]
    CustomerNotFound(String),

    #[error("order {order_id} not found for customer {customer_id}")]
    OrderNotFound { customer_id: String, order_id: String },
}

/// Entity counts, for the admin status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct StoreStats {
    pub customers: usize,
    pub orders: usize,
}

/// Thread-safe owner of every customer and order.
///
/// Every operation holds one store-wide lock for its full read-modify sequence.
/// Returned values are copies; mutating them does not affect the store.
#[derive(Debug, Default)]
pub struct Store {
    customers: Mutex<HashMap<String, Customer>>,
    ids: IdGenerator,
}

impl Store {
    /// Create an empty store using the system clock for identities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with a custom identity generator.
    pub fn with_id_generator(ids: IdGenerator) -> Self {
        Self {
            customers: Mutex::new(HashMap::new()),
            ids,
        }
    }

    // Critical sections never leave the map half-updated, so a poisoned lock
    // still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Customer>> {
        self.customers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all customers, ordered by id.
    pub fn list_customers(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> = self.lock().values().cloned().collect();
        customers.sort_by(|a, b| a.id.cmp(&b.id));
        customers
    }

    pub fn get_customer(&self, id: &str) -> Result<Customer, StoreError> {
        self.lock()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::CustomerNotFound(id.to_string()))
    }

    /// Create a customer with a fresh identity and no orders.
    pub fn create_customer(&self, name: impl Into<String>, age: i64) -> Customer {
        let mut customers = self.lock();
        let customer = Customer::new(self.ids.next_id(), name.into(), age);
        customers.insert(customer.id.clone(), customer.clone());
        let stats = stats_of(&customers);
        drop(customers);

        tracing::info!(customer_id = %customer.id, "Customer created");
        metrics::record_store_size(stats.customers, stats.orders);
        customer
    }

    pub fn list_orders(&self, customer_id: &str) -> Result<Vec<Order>, StoreError> {
        self.lock()
            .get(customer_id)
            .map(|c| c.orders.clone())
            .ok_or_else(|| StoreError::CustomerNotFound(customer_id.to_string()))
    }

    /// Two-level lookup: the customer must exist, then the order within it.
    pub fn get_order(&self, customer_id: &str, order_id: &str) -> Result<Order, StoreError> {
        let customers = self.lock();
        let customer = customers
            .get(customer_id)
            .ok_or_else(|| StoreError::CustomerNotFound(customer_id.to_string()))?;
        customer
            .order(order_id)
            .cloned()
            .ok_or_else(|| StoreError::OrderNotFound {
                customer_id: customer_id.to_string(),
                order_id: order_id.to_string(),
            })
    }

    /// Create a pending order with a fresh identity under `customer_id`.
    pub fn create_order(
        &self,
        customer_id: &str,
        product: impl Into<String>,
        price: f64,
        amount: i64,
    ) -> Result<Order, StoreError> {
        let mut customers = self.lock();
        let customer = customers
            .get_mut(customer_id)
            .ok_or_else(|| StoreError::CustomerNotFound(customer_id.to_string()))?;
        let order = Order::new(self.ids.next_id(), product.into(), price, amount);
        let stored = customer.add_order(order).clone();
        let stats = stats_of(&customers);
        drop(customers);

        tracing::info!(customer_id = %customer_id, order_id = %stored.id, "Order created");
        metrics::record_store_size(stats.customers, stats.orders);
        Ok(stored)
    }

    /// Append an already-built order. If the customer already holds an order
    /// with the same id, nothing changes and the existing order is returned.
    pub fn insert_order(&self, customer_id: &str, order: Order) -> Result<Order, StoreError> {
        let mut customers = self.lock();
        let customer = customers
            .get_mut(customer_id)
            .ok_or_else(|| StoreError::CustomerNotFound(customer_id.to_string()))?;
        let stored = customer.add_order(order).clone();
        Ok(stored)
    }

    pub fn stats(&self) -> StoreStats {
        stats_of(&self.lock())
    }
}

fn stats_of(customers: &HashMap<String, Customer>) -> StoreStats {
    StoreStats {
        customers: customers.len(),
        orders: customers.values().map(|c| c.orders.len()).sum(),
    }
}
