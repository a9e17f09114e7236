use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::catalog::{ComplementId, ProductId};

/// One line of the customer's cart.
///
/// Name, image and unit price are denormalized at add-time so the cart can
/// be rendered without the catalog; the authoritative prices are resolved
/// again from the live catalog at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub size: String,
    pub unit_price: BigDecimal,
    pub complements: Vec<ComplementId>,
    pub quantity: u32,
}

impl CartLine {
    pub fn key(&self) -> LineKey {
        LineKey::new(
            self.product_id.clone(),
            self.size.clone(),
            self.complements.clone(),
        )
    }

    pub fn subtotal(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// Identity of a cart line: product, size and the complement selection.
///
/// Complement ids are sorted on construction so that two selections made in
/// a different order compare equal and merge into one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub complements: Vec<ComplementId>,
}

impl LineKey {
    pub fn new(product_id: ProductId, size: String, mut complements: Vec<ComplementId>) -> Self {
        complements.sort();
        Self {
            product_id,
            size,
            complements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    fn line(complements: &[&str]) -> CartLine {
        CartLine {
            product_id: "p1".to_string(),
            name: "Açaí 500ml".to_string(),
            image: "acai.jpg".to_string(),
            size: "500ml".to_string(),
            unit_price: BigDecimal::from_str("16.90").unwrap(),
            complements: complements.iter().map(|s| s.to_string()).collect(),
            quantity: 1,
        }
    }

    #[test]
    fn key_ignores_complement_order() {
        assert_eq!(line(&["c2", "c1"]).key(), line(&["c1", "c2"]).key());
    }

    #[test]
    fn key_distinguishes_selection() {
        assert_ne!(line(&["c1"]).key(), line(&["c1", "c2"]).key());
        assert_ne!(line(&[]).key(), line(&["c1"]).key());
    }

    #[test]
    fn key_distinguishes_size() {
        let mut small = line(&[]);
        small.size = "300ml".to_string();
        assert_ne!(small.key(), line(&[]).key());
    }

    #[test]
    fn subtotal_multiplies_by_quantity() {
        let mut l = line(&[]);
        l.quantity = 2;
        assert_eq!(l.subtotal(), BigDecimal::from_str("33.80").unwrap());
    }

    #[test]
    fn snapshot_roundtrip() {
        let l = line(&["c1"]);
        let json = serde_json::to_string(&vec![l.clone()]).unwrap();
        let back: Vec<CartLine> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![l]);
    }
}
