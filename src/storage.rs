//! Scenario-scoped mapping from human-readable references to order ids.
//!
//! Setup steps store an order under a name such as `bob_order`; later steps
//! refer to the order by that name. The storage is an ordinary value owned by
//! whoever drives the scenario, so each scenario starts empty.

use std::collections::HashMap;

use crate::error::StorageError;
use crate::order::OrderId;

/// References to orders created during a scenario.
#[derive(Debug, Clone, Default)]
pub struct SharedStorage {
    orders: HashMap<String, OrderId>,
}

impl SharedStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `order_id` under `reference`, returning any id it replaces.
    pub fn insert(&mut self, reference: impl Into<String>, order_id: OrderId) -> Option<OrderId> {
        self.orders.insert(reference.into(), order_id)
    }

    /// Resolves a reference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReferenceNotFound`] if nothing is stored under
    /// `reference`.
    pub fn get(&self, reference: &str) -> Result<OrderId, StorageError> {
        self.orders
            .get(reference)
            .copied()
            .ok_or_else(|| StorageError::ReferenceNotFound {
                reference: reference.to_owned(),
            })
    }

    /// Returns whether `reference` is stored.
    #[must_use]
    pub fn contains(&self, reference: &str) -> bool {
        self.orders.contains_key(reference)
    }

    /// Removes every stored reference.
    pub fn clear(&mut self) {
        self.orders.clear();
    }
}
