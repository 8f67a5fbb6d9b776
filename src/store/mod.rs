//! In-memory customer and order storage.
//!
//! # Data Flow
//! ```text
//! Handler (decoded name/age, product/price/amount, path params)
//!     → memory.rs (single store-wide lock)
//!     → id.rs (allocate identity inside the critical section)
//!     → model.rs (Customer owns its Vec<Order>)
//!     → Return: cloned entity or StoreError
//! ```
//!
//! # Design Decisions
//! - One `Mutex` guards the whole customer map, orders included
//! - Callers only ever receive clones; no guard escapes the store
//! - Lookup + append for a new order is one critical section
//! - No update or delete operations; entities live as long as the process

pub mod id;
pub mod memory;
pub mod model;

pub use id::{Clock, IdGenerator, SystemClock};
pub use memory::{Store, StoreError, StoreStats};
pub use model::{Customer, NewCustomer, NewOrder, Order, OrderStatus};
