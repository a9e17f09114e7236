use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cart::CartLine;
use super::catalog::{Complement, ComplementId, Product, ProductId};
use super::errors::DomainError;

pub const TRACKING_PREFIX: &str = "PED";

/// A submitted order. Items are fully resolved at creation time so the
/// record stays stable when the catalog changes later.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub tracking_code: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub payment: PaymentMethod,
    /// Amount the customer will pay with, cash orders only.
    pub change_for: Option<BigDecimal>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub size: String,
    /// Price charged per unit: size price plus the selected complements.
    pub unit_price: BigDecimal,
    pub complements: Vec<OrderComplement>,
    pub quantity: u32,
}

impl OrderItem {
    pub fn subtotal(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// Complement selection captured at order time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderComplement {
    pub id: ComplementId,
    pub name: String,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Em Preparo")]
    Preparing,
    #[serde(rename = "Pronto")]
    Ready,
    #[serde(rename = "Saiu para entrega")]
    OutForDelivery,
    #[serde(rename = "Entregue")]
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// Customer-facing label, also the wire representation.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendente",
            OrderStatus::Preparing => "Em Preparo",
            OrderStatus::Ready => "Pronto",
            OrderStatus::OutForDelivery => "Saiu para entrega",
            OrderStatus::Delivered => "Entregue",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "out-for-delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(format!(
                "unknown status '{other}' (expected pending, preparing, ready, \
                 out-for-delivery or delivered)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "pix")]
    Pix,
    #[serde(rename = "dinheiro")]
    Cash,
    #[serde(rename = "cartao")]
    Card,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Pix => "Pix",
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Card => "Cartão",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pix" => Ok(PaymentMethod::Pix),
            "cash" | "dinheiro" => Ok(PaymentMethod::Cash),
            "card" | "cartao" => Ok(PaymentMethod::Card),
            other => Err(format!("unknown payment method '{other}'")),
        }
    }
}

/// Resolve cart lines against the live catalog.
///
/// Any unknown product, size or complement aborts the whole order; there
/// are no partial orders.
pub fn resolve_items(
    cart: &[CartLine],
    products: &[Product],
    complements: &[Complement],
) -> Result<Vec<OrderItem>, DomainError> {
    cart.iter()
        .map(|line| {
            let product = products
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| DomainError::ProductNotFound(line.product_id.clone()))?;
            let size = product.size(&line.size).ok_or_else(|| DomainError::SizeNotFound {
                product_id: product.id.clone(),
                size: line.size.clone(),
            })?;
            let selected = line
                .complements
                .iter()
                .map(|id| {
                    complements
                        .iter()
                        .find(|c| &c.id == id)
                        .map(|c| OrderComplement {
                            id: c.id.clone(),
                            name: c.name.clone(),
                            price: c.price.clone(),
                        })
                        .ok_or_else(|| DomainError::ComplementNotFound(id.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let unit_price = selected
                .iter()
                .fold(size.price.clone(), |acc, c| acc + &c.price);
            Ok(OrderItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                image: product.image.clone(),
                size: size.label.clone(),
                unit_price,
                complements: selected,
                quantity: line.quantity,
            })
        })
        .collect()
}

pub fn order_total(items: &[OrderItem]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::from(0), |acc, item| acc + item.subtotal())
}

/// Human-readable tracking code: "PED" plus four random decimal digits.
/// Not globally unique; collisions are possible and accepted.
pub fn tracking_code<R: Rng>(rng: &mut R) -> String {
    format!("{TRACKING_PREFIX}{}", rng.gen_range(1000..10000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{ComplementCategory, Size};
    use std::str::FromStr as _;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn catalog() -> (Vec<Product>, Vec<Complement>) {
        let products = vec![Product {
            id: "p1".to_string(),
            name: "Açaí 500ml".to_string(),
            image: "acai.jpg".to_string(),
            description: String::new(),
            sizes: vec![Size {
                label: "500ml".to_string(),
                price: dec("16.90"),
            }],
        }];
        let complements = vec![
            Complement {
                id: "c1".to_string(),
                name: "Morango".to_string(),
                category: ComplementCategory::Fruit,
                price: dec("0"),
                active: true,
            },
            Complement {
                id: "c2".to_string(),
                name: "Granola".to_string(),
                category: ComplementCategory::Extra,
                price: dec("2.50"),
                active: true,
            },
        ];
        (products, complements)
    }

    fn cart_line(complements: &[&str], quantity: u32) -> CartLine {
        CartLine {
            product_id: "p1".to_string(),
            name: "Açaí 500ml".to_string(),
            image: "acai.jpg".to_string(),
            size: "500ml".to_string(),
            unit_price: dec("16.90"),
            complements: complements.iter().map(|s| s.to_string()).collect(),
            quantity,
        }
    }

    #[test]
    fn resolves_prices_from_live_catalog() {
        let (products, complements) = catalog();
        let items = resolve_items(&[cart_line(&[], 2)], &products, &complements).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_price, dec("16.90"));
        assert_eq!(order_total(&items), dec("33.80"));
    }

    #[test]
    fn unit_price_includes_complements() {
        let (products, complements) = catalog();
        let items = resolve_items(&[cart_line(&["c1", "c2"], 1)], &products, &complements).unwrap();
        assert_eq!(items[0].unit_price, dec("19.40"));
        assert_eq!(items[0].complements.len(), 2);
    }

    #[test]
    fn unknown_product_fails() {
        let (products, complements) = catalog();
        let mut line = cart_line(&[], 1);
        line.product_id = "missing".to_string();
        let err = resolve_items(&[line], &products, &complements).unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(id) if id == "missing"));
    }

    #[test]
    fn unknown_size_fails() {
        let (products, complements) = catalog();
        let mut line = cart_line(&[], 1);
        line.size = "1l".to_string();
        let err = resolve_items(&[line], &products, &complements).unwrap_err();
        assert!(matches!(err, DomainError::SizeNotFound { .. }));
    }

    #[test]
    fn unknown_complement_fails() {
        let (products, complements) = catalog();
        let err =
            resolve_items(&[cart_line(&["ghost"], 1)], &products, &complements).unwrap_err();
        assert!(matches!(err, DomainError::ComplementNotFound(id) if id == "ghost"));
    }

    #[test]
    fn total_sums_all_lines() {
        let (products, complements) = catalog();
        let items = resolve_items(
            &[cart_line(&[], 2), cart_line(&["c2"], 1)],
            &products,
            &complements,
        )
        .unwrap();
        // 16.90 * 2 + 19.40
        assert_eq!(order_total(&items), dec("53.20"));
    }

    #[test]
    fn tracking_code_format() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let code = tracking_code(&mut rng);
            assert!(code.starts_with(TRACKING_PREFIX));
            let digits = &code[TRACKING_PREFIX.len()..];
            assert_eq!(digits.len(), 4);
            let n: u32 = digits.parse().unwrap();
            assert!((1000..10000).contains(&n));
        }
    }

    #[test]
    fn status_labels_and_parsing() {
        assert_eq!(OrderStatus::Pending.to_string(), "Pendente");
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "Saiu para entrega");
        assert_eq!(
            OrderStatus::from_str("out-for-delivery").unwrap(),
            OrderStatus::OutForDelivery
        );
        assert!(OrderStatus::from_str("cancelled").is_err());
    }
}
