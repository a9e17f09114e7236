use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("size '{size}' not found for product '{product_id}'")]
    SizeNotFound { product_id: String, size: String },

    #[error("complement not found: {0}")]
    ComplementNotFound(String),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("api request failed: {0}")]
    Api(String),

    #[error("api returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("storage error: {0}")]
    Storage(String),
}
