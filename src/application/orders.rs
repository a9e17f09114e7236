use chrono::Utc;
use uuid::Uuid;

use crate::domain::cart::CartLine;
use crate::domain::catalog::{Complement, Product};
use crate::domain::checkout::CheckoutForm;
use crate::domain::errors::DomainError;
use crate::domain::order::{order_total, resolve_items, tracking_code, Order, OrderStatus, PaymentMethod};
use crate::domain::ports::StorefrontApi;

/// Read-mostly cache of orders plus the checkout assembly. The backend owns
/// an order once created; this store keeps the frontend copy.
pub struct OrderStore<A> {
    api: A,
    orders: Vec<Order>,
}

impl<A: StorefrontApi> OrderStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            orders: Vec::new(),
        }
    }

    /// Assemble an order from the cart and submit it.
    ///
    /// Prices are resolved against the live catalog; any unknown product,
    /// size or complement aborts the whole order before anything is sent.
    /// On success the order is prepended to the local list (most recent
    /// first) and the tracking code is returned.
    pub async fn create(
        &mut self,
        cart: &[CartLine],
        form: &CheckoutForm,
        products: &[Product],
        complements: &[Complement],
    ) -> Result<String, DomainError> {
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        let items = resolve_items(cart, products, complements)?;
        let total = order_total(&items);
        let code = tracking_code(&mut rand::thread_rng());

        let change_for = match form.payment {
            PaymentMethod::Cash => form.change_for.clone(),
            _ => None,
        };

        let order = Order {
            id: Uuid::new_v4(),
            tracking_code: code.clone(),
            customer_name: form.customer_name.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
            payment: form.payment,
            change_for,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            items,
            total,
        };

        self.api.submit_order(&order).await?;
        self.orders.insert(0, order);
        Ok(code)
    }

    /// Replace the local list with the backend's, most recent first.
    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        let mut orders = self.api.fetch_orders().await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.orders = orders;
        Ok(())
    }

    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    pub fn by_id(&self, id: Uuid) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Fetch one order from the backend and upsert it into the local list.
    pub async fn fetch(&mut self, id: Uuid) -> Result<Option<&Order>, DomainError> {
        let Some(order) = self.api.fetch_order(id).await? else {
            return Ok(None);
        };
        if let Some(slot) = self.orders.iter_mut().find(|o| o.id == id) {
            *slot = order;
        } else {
            self.orders.push(order);
        }
        Ok(self.by_id(id))
    }

    pub fn by_code(&self, code: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.tracking_code == code)
    }

    /// Write the new status to the backend, then overwrite it locally.
    /// No forward-only check: the admin can reassign freely.
    pub async fn update_status(
        &mut self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<(), DomainError> {
        self.api.update_order_status(id, status).await?;
        if let Some(order) = self.orders.iter_mut().find(|o| o.id == id) {
            order.status = status;
        }
        Ok(())
    }
}
