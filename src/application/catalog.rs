use crate::domain::catalog::{Complement, Product};
use crate::domain::errors::DomainError;
use crate::domain::ports::{ComplementDraft, ProductDraft, StorefrontApi};

/// Local cache of the product and complement catalog, refreshed from the
/// remote API. Also fronts the admin CRUD operations, keeping the cache in
/// step with successful writes.
pub struct CatalogStore<A> {
    api: A,
    products: Vec<Product>,
    complements: Vec<Complement>,
}

impl<A: StorefrontApi> CatalogStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            products: Vec::new(),
            complements: Vec::new(),
        }
    }

    /// Fetch both catalog lists, replacing the cache wholesale.
    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        self.products = self.api.list_products().await?;
        self.complements = self.api.list_complements().await?;
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn complements(&self) -> &[Complement] {
        &self.complements
    }

    /// Complements offered to the storefront picker.
    pub fn active_complements(&self) -> impl Iterator<Item = &Complement> {
        self.complements.iter().filter(|c| c.active)
    }

    pub fn complement(&self, id: &str) -> Option<&Complement> {
        self.complements.iter().find(|c| c.id == id)
    }

    pub async fn create_product(&mut self, draft: ProductDraft) -> Result<Product, DomainError> {
        let created = self.api.create_product(draft).await?;
        self.products.push(created.clone());
        Ok(created)
    }

    pub async fn update_product(
        &mut self,
        id: &str,
        draft: ProductDraft,
    ) -> Result<Product, DomainError> {
        let updated = self.api.update_product(id, draft).await?;
        if let Some(p) = self.products.iter_mut().find(|p| p.id == id) {
            *p = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete_product(&mut self, id: &str) -> Result<(), DomainError> {
        self.api.delete_product(id).await?;
        self.products.retain(|p| p.id != id);
        Ok(())
    }

    pub async fn create_complement(
        &mut self,
        draft: ComplementDraft,
    ) -> Result<Complement, DomainError> {
        let created = self.api.create_complement(draft).await?;
        self.complements.push(created.clone());
        Ok(created)
    }

    pub async fn update_complement(
        &mut self,
        id: &str,
        draft: ComplementDraft,
    ) -> Result<Complement, DomainError> {
        let updated = self.api.update_complement(id, draft).await?;
        if let Some(c) = self.complements.iter_mut().find(|c| c.id == id) {
            *c = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete_complement(&mut self, id: &str) -> Result<(), DomainError> {
        self.api.delete_complement(id).await?;
        self.complements.retain(|c| c.id != id);
        Ok(())
    }
}
