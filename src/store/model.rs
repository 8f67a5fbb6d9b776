//! Customer and order entities.
//!
//! All types derive Serde traits; these are the shapes written to and read
//! from request/response bodies.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an order. New orders start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Created,
    Payed,
    Shipped,
    Received,
    Canceled,
}

/// A customer and the orders it owns.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub age: i64,
    #[serde(default)]
    pub disabled: bool,

    /// Insertion-ordered, unique by order id. Never serialized on the customer.
    #[serde(skip)]
    pub orders: Vec<Order>,
}

impl Customer {
    /// Build a fresh customer with no orders.
    pub fn new(id: String, name: String, age: i64) -> Self {
        Self {
            id,
            name,
            age,
            disabled: false,
            orders: Vec::new(),
        }
    }

    /// Find an order by id.
    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Append `order` unless an order with the same id already exists.
    ///
    /// Returns the stored order: the new one, or the existing one untouched.
    pub fn add_order(&mut self, order: Order) -> &Order {
        match self.orders.iter().position(|o| o.id == order.id) {
            Some(idx) => &self.orders[idx],
            None => {
                self.orders.push(order);
                &self.orders[self.orders.len() - 1]
            }
        }
    }
}

/// A single order placed by a customer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Order {
    pub id: String,
    pub product: String,
    pub price: f64,
    pub amount: i64,
    pub status: OrderStatus,
}

impl Order {
    /// Build a new pending order.
    pub fn new(id: String, product: String, price: f64, amount: i64) -> Self {
        Self {
            id,
            product,
            price,
            amount,
            status: OrderStatus::Pending,
        }
    }
}

/// Payload for creating a customer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewCustomer {
    pub name: String,
    pub age: i64,
}

/// Payload for creating an order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewOrder {
    pub product: String,
    pub price: f64,
    pub amount: i64,
}
