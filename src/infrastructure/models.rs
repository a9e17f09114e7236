//! Wire representations of the backend's resources.
//!
//! The backend speaks Portuguese field names and decimal-string prices;
//! everything is mapped to the typed domain model right here at the
//! boundary, validating the catalog invariants on the way in.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::{Complement, ComplementCategory, Product, Size};
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderComplement, OrderItem, OrderStatus, PaymentMethod};

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "imagem", default)]
    pub image: String,
    #[serde(rename = "tamanhos")]
    pub sizes: Vec<SizeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeDto {
    #[serde(rename = "rotulo")]
    pub label: String,
    #[serde(rename = "preco")]
    pub price: BigDecimal,
}

impl TryFrom<ProductDto> for Product {
    type Error = DomainError;

    fn try_from(dto: ProductDto) -> Result<Self, Self::Error> {
        if dto.sizes.is_empty() {
            return Err(DomainError::InvalidPayload(format!(
                "product '{}' has no sizes",
                dto.id
            )));
        }
        let sizes = dto
            .sizes
            .into_iter()
            .map(|s| {
                if s.price <= BigDecimal::from(0) {
                    return Err(DomainError::InvalidPayload(format!(
                        "product '{}' size '{}' has non-positive price",
                        dto.id, s.label
                    )));
                }
                Ok(Size {
                    label: s.label,
                    price: s.price,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Product {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            image: dto.image,
            sizes,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplementDto {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub category: ComplementCategory,
    #[serde(rename = "preco")]
    pub price: BigDecimal,
    // Older records omit the flag; they are treated as active.
    #[serde(rename = "ativo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl TryFrom<ComplementDto> for Complement {
    type Error = DomainError;

    fn try_from(dto: ComplementDto) -> Result<Self, Self::Error> {
        if dto.price < BigDecimal::from(0) {
            return Err(DomainError::InvalidPayload(format!(
                "complement '{}' has negative price",
                dto.id
            )));
        }
        Ok(Complement {
            id: dto.id,
            name: dto.name,
            category: dto.category,
            price: dto.price,
            active: dto.active,
        })
    }
}

/// Body for complement create/update.
#[derive(Debug, Clone, Serialize)]
pub struct ComplementBody {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub category: ComplementCategory,
    #[serde(rename = "preco")]
    pub price: BigDecimal,
    #[serde(rename = "ativo")]
    pub active: bool,
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: Uuid,
    #[serde(rename = "codigo")]
    pub tracking_code: String,
    #[serde(rename = "nomeCliente")]
    pub customer_name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "formaPagamento")]
    pub payment: PaymentMethod,
    #[serde(rename = "trocoPara", default, skip_serializing_if = "Option::is_none")]
    pub change_for: Option<BigDecimal>,
    pub status: OrderStatus,
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "itens")]
    pub items: Vec<OrderItemDto>,
    pub total: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDto {
    #[serde(rename = "produtoId")]
    pub product_id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "imagem", default)]
    pub image: String,
    #[serde(rename = "tamanho")]
    pub size: String,
    #[serde(rename = "precoUnitario")]
    pub unit_price: BigDecimal,
    #[serde(rename = "complementos", default)]
    pub complements: Vec<OrderComplementDto>,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderComplementDto {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: BigDecimal,
}

/// Body for the status PATCH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: OrderStatus,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        OrderDto {
            id: order.id,
            tracking_code: order.tracking_code.clone(),
            customer_name: order.customer_name.clone(),
            phone: order.phone.clone(),
            address: order.address.clone(),
            payment: order.payment,
            change_for: order.change_for.clone(),
            status: order.status,
            created_at: order.created_at,
            items: order.items.iter().map(OrderItemDto::from).collect(),
            total: order.total.clone(),
        }
    }
}

impl From<&OrderItem> for OrderItemDto {
    fn from(item: &OrderItem) -> Self {
        OrderItemDto {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            size: item.size.clone(),
            unit_price: item.unit_price.clone(),
            complements: item
                .complements
                .iter()
                .map(|c| OrderComplementDto {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    price: c.price.clone(),
                })
                .collect(),
            quantity: item.quantity,
        }
    }
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        Order {
            id: dto.id,
            tracking_code: dto.tracking_code,
            customer_name: dto.customer_name,
            phone: dto.phone,
            address: dto.address,
            payment: dto.payment,
            change_for: dto.change_for,
            status: dto.status,
            created_at: dto.created_at,
            items: dto.items.into_iter().map(Into::into).collect(),
            total: dto.total,
        }
    }
}

impl From<OrderItemDto> for OrderItem {
    fn from(dto: OrderItemDto) -> Self {
        OrderItem {
            product_id: dto.product_id,
            name: dto.name,
            image: dto.image,
            size: dto.size,
            unit_price: dto.unit_price,
            complements: dto
                .complements
                .into_iter()
                .map(|c| OrderComplement {
                    id: c.id,
                    name: c.name,
                    price: c.price,
                })
                .collect(),
            quantity: dto.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    #[test]
    fn product_payload_maps_to_domain() {
        let json = r#"{
            "id": "p1",
            "nome": "Açaí 500ml",
            "descricao": "Batido na hora",
            "imagem": "acai.jpg",
            "tamanhos": [{"rotulo": "500ml", "preco": "16.90"}]
        }"#;
        let dto: ProductDto = serde_json::from_str(json).unwrap();
        let product = Product::try_from(dto).unwrap();
        assert_eq!(product.name, "Açaí 500ml");
        assert_eq!(
            product.sizes[0].price,
            BigDecimal::from_str("16.90").unwrap()
        );
    }

    #[test]
    fn product_without_sizes_is_rejected() {
        let json = r#"{"id": "p1", "nome": "Açaí", "tamanhos": []}"#;
        let dto: ProductDto = serde_json::from_str(json).unwrap();
        assert!(matches!(
            Product::try_from(dto),
            Err(DomainError::InvalidPayload(_))
        ));
    }

    #[test]
    fn non_positive_size_price_is_rejected() {
        let json = r#"{
            "id": "p1",
            "nome": "Açaí",
            "tamanhos": [{"rotulo": "500ml", "preco": "0"}]
        }"#;
        let dto: ProductDto = serde_json::from_str(json).unwrap();
        assert!(Product::try_from(dto).is_err());
    }

    #[test]
    fn complement_defaults_to_active() {
        let json = r#"{"id": "c1", "nome": "Morango", "tipo": "fruta", "preco": "0"}"#;
        let dto: ComplementDto = serde_json::from_str(json).unwrap();
        let complement = Complement::try_from(dto).unwrap();
        assert!(complement.active);
        assert_eq!(complement.category, ComplementCategory::Fruit);
    }

    #[test]
    fn negative_complement_price_is_rejected() {
        let json = r#"{"id": "c1", "nome": "Morango", "tipo": "fruta", "preco": "-1"}"#;
        let dto: ComplementDto = serde_json::from_str(json).unwrap();
        assert!(Complement::try_from(dto).is_err());
    }

    #[test]
    fn status_uses_storefront_labels_on_the_wire() {
        let json = serde_json::to_string(&StatusBody {
            status: OrderStatus::OutForDelivery,
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"Saiu para entrega"}"#);

        let back: StatusBody = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, OrderStatus::OutForDelivery);
    }

    #[test]
    fn order_roundtrips_through_the_wire_shape() {
        let order = Order {
            id: Uuid::new_v4(),
            tracking_code: "PED1234".to_string(),
            customer_name: "Maria Silva".to_string(),
            phone: "11987654321".to_string(),
            address: "Rua X, 10".to_string(),
            payment: PaymentMethod::Cash,
            change_for: Some(BigDecimal::from_str("50.00").unwrap()),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            items: vec![OrderItem {
                product_id: "p1".to_string(),
                name: "Açaí 500ml".to_string(),
                image: "acai.jpg".to_string(),
                size: "500ml".to_string(),
                unit_price: BigDecimal::from_str("16.90").unwrap(),
                complements: vec![OrderComplement {
                    id: "c1".to_string(),
                    name: "Morango".to_string(),
                    price: BigDecimal::from(0),
                }],
                quantity: 2,
            }],
            total: BigDecimal::from_str("33.80").unwrap(),
        };

        let json = serde_json::to_string(&OrderDto::from(&order)).unwrap();
        assert!(json.contains(r#""formaPagamento":"dinheiro""#));
        assert!(json.contains(r#""status":"Pendente""#));

        let dto: OrderDto = serde_json::from_str(&json).unwrap();
        assert_eq!(Order::from(dto), order);
    }
}
