use bigdecimal::BigDecimal;

use crate::domain::cart::{CartLine, LineKey};
use crate::domain::ports::SnapshotStore;

/// Storage key for the cart snapshot.
pub const CART_KEY: &str = "cart";

/// The customer's cart. Every mutation writes the full snapshot back to the
/// snapshot store so the cart survives restarts.
pub struct CartStore<S> {
    snapshots: S,
    lines: Vec<CartLine>,
}

impl<S: SnapshotStore> CartStore<S> {
    /// Load the persisted cart. A missing or corrupt snapshot is logged and
    /// treated as an empty cart, never an error.
    pub fn load(snapshots: S) -> Self {
        let lines = match snapshots.load(CART_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(lines) => lines,
                Err(e) => {
                    log::warn!("discarding corrupt cart snapshot: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("failed to read cart snapshot: {e}");
                Vec::new()
            }
        };
        Self { snapshots, lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Display total from the prices captured at add-time. The checkout
    /// recomputes against the live catalog.
    pub fn total(&self) -> BigDecimal {
        self.lines
            .iter()
            .fold(BigDecimal::from(0), |acc, line| acc + line.subtotal())
    }

    /// Add a line, merging quantities into an existing line with the same
    /// identity (product, size, complement set regardless of order).
    pub fn add(&mut self, line: CartLine) {
        let key = line.key();
        match self.lines.iter_mut().find(|l| l.key() == key) {
            Some(existing) => existing.quantity += line.quantity,
            None => self.lines.push(line),
        }
        self.persist();
    }

    /// Remove the line with this identity. No-op when absent.
    pub fn remove(&mut self, key: &LineKey) {
        let before = self.lines.len();
        self.lines.retain(|l| l.key() != *key);
        if self.lines.len() != before {
            self.persist();
        }
    }

    /// Set the quantity of the line with this identity. Callers clamp the
    /// quantity to at least 1. No-op when absent.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.key() == *key) {
            line.quantity = quantity;
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.lines) {
            Ok(json) => json,
            Err(e) => {
                log::error!("failed to encode cart snapshot: {e}");
                return;
            }
        };
        if let Err(e) = self.snapshots.save(CART_KEY, &json) {
            // The in-memory cart stays authoritative for this session.
            log::error!("failed to persist cart snapshot: {e}");
        }
    }
}
