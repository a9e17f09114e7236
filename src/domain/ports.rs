use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::catalog::{Complement, ComplementCategory, Product, Size};
use super::errors::DomainError;
use super::order::{Order, OrderStatus};

/// Fields for creating or replacing a product. The image, when present, is
/// uploaded alongside the other fields as multipart form data.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub sizes: Vec<Size>,
    pub image: Option<ImageFile>,
}

#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ComplementDraft {
    pub name: String,
    pub category: ComplementCategory,
    pub price: BigDecimal,
    pub active: bool,
}

/// The remote storefront API. Implemented over HTTP in production and by
/// in-memory fakes in tests; stores are generic over it.
pub trait StorefrontApi {
    async fn list_products(&self) -> Result<Vec<Product>, DomainError>;
    async fn create_product(&self, draft: ProductDraft) -> Result<Product, DomainError>;
    async fn update_product(&self, id: &str, draft: ProductDraft) -> Result<Product, DomainError>;
    async fn delete_product(&self, id: &str) -> Result<(), DomainError>;

    async fn list_complements(&self) -> Result<Vec<Complement>, DomainError>;
    async fn create_complement(&self, draft: ComplementDraft) -> Result<Complement, DomainError>;
    async fn update_complement(
        &self,
        id: &str,
        draft: ComplementDraft,
    ) -> Result<Complement, DomainError>;
    async fn delete_complement(&self, id: &str) -> Result<(), DomainError>;

    async fn submit_order(&self, order: &Order) -> Result<(), DomainError>;
    async fn fetch_orders(&self) -> Result<Vec<Order>, DomainError>;
    async fn fetch_order(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> Result<(), DomainError>;
}

impl<A: StorefrontApi> StorefrontApi for &A {
    async fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        (**self).list_products().await
    }

    async fn create_product(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        (**self).create_product(draft).await
    }

    async fn update_product(&self, id: &str, draft: ProductDraft) -> Result<Product, DomainError> {
        (**self).update_product(id, draft).await
    }

    async fn delete_product(&self, id: &str) -> Result<(), DomainError> {
        (**self).delete_product(id).await
    }

    async fn list_complements(&self) -> Result<Vec<Complement>, DomainError> {
        (**self).list_complements().await
    }

    async fn create_complement(&self, draft: ComplementDraft) -> Result<Complement, DomainError> {
        (**self).create_complement(draft).await
    }

    async fn update_complement(
        &self,
        id: &str,
        draft: ComplementDraft,
    ) -> Result<Complement, DomainError> {
        (**self).update_complement(id, draft).await
    }

    async fn delete_complement(&self, id: &str) -> Result<(), DomainError> {
        (**self).delete_complement(id).await
    }

    async fn submit_order(&self, order: &Order) -> Result<(), DomainError> {
        (**self).submit_order(order).await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, DomainError> {
        (**self).fetch_orders().await
    }

    async fn fetch_order(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        (**self).fetch_order(id).await
    }

    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> Result<(), DomainError> {
        (**self).update_order_status(id, status).await
    }
}

/// Durable key→JSON storage for the cart and session snapshots.
///
/// `load` returns `Ok(None)` for a missing key; callers treat corrupt
/// payloads as absent state rather than failing.
pub trait SnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, DomainError>;
    fn save(&self, key: &str, value: &str) -> Result<(), DomainError>;
    fn delete(&self, key: &str) -> Result<(), DomainError>;
}

impl<S: SnapshotStore> SnapshotStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>, DomainError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), DomainError> {
        (**self).save(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), DomainError> {
        (**self).delete(key)
    }
}
