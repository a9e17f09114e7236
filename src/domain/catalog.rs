use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Backend-assigned product identifier. Opaque to this crate.
pub type ProductId = String;
/// Backend-assigned complement identifier. Opaque to this crate.
pub type ComplementId = String;

/// A sellable product with at least one size.
///
/// Invariants (`sizes` non-empty, every price positive) are enforced when
/// decoding API payloads, so a `Product` held in memory is always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub sizes: Vec<Size>,
}

impl Product {
    pub fn size(&self, label: &str) -> Option<&Size> {
        self.sizes.iter().find(|s| s.label == label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Size {
    pub label: String,
    pub price: BigDecimal,
}

/// A topping/extra that can be added to a product.
#[derive(Debug, Clone, PartialEq)]
pub struct Complement {
    pub id: ComplementId,
    pub name: String,
    pub category: ComplementCategory,
    pub price: BigDecimal,
    pub active: bool,
}

/// Complement grouping used by the storefront picker. The wire labels are
/// the storefront's Portuguese ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplementCategory {
    #[serde(rename = "fruta")]
    Fruit,
    #[serde(rename = "cobertura")]
    Topping,
    #[serde(rename = "adicional")]
    Extra,
}

impl ComplementCategory {
    pub const ALL: [ComplementCategory; 3] = [
        ComplementCategory::Fruit,
        ComplementCategory::Topping,
        ComplementCategory::Extra,
    ];

    /// Maximum simultaneous selections for this category.
    /// `None` means unlimited.
    pub fn limit(self) -> Option<usize> {
        match self {
            ComplementCategory::Fruit => Some(1),
            ComplementCategory::Topping => Some(1),
            ComplementCategory::Extra => Some(3),
        }
    }

    /// Customer-facing label, as shown on the product page.
    pub fn label(self) -> &'static str {
        match self {
            ComplementCategory::Fruit => "fruta",
            ComplementCategory::Topping => "cobertura",
            ComplementCategory::Extra => "adicional",
        }
    }
}

impl fmt::Display for ComplementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplementCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fruit" | "fruta" => Ok(ComplementCategory::Fruit),
            "topping" | "cobertura" => Ok(ComplementCategory::Topping),
            "extra" | "adicional" => Ok(ComplementCategory::Extra),
            other => Err(format!("unknown complement category '{other}'")),
        }
    }
}
