use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use uuid::Uuid;

use crate::domain::catalog::{Complement, Product};
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::{ComplementDraft, ProductDraft, StorefrontApi};

use super::models::{ComplementBody, ComplementDto, OrderDto, ProductDto, SizeDto, StatusBody};

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::Api(e.to_string())
    }
}

/// `StorefrontApi` over the backend's REST endpoints.
pub struct RestStorefrontApi {
    client: reqwest::Client,
    base_url: String,
}

impl RestStorefrontApi {
    pub fn new(base_url: &str) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: Response) -> Result<Response, DomainError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(DomainError::Status {
                status: response.status().as_u16(),
                url: response.url().to_string(),
            })
        }
    }

    /// Product create/update payload: plain fields plus the sizes as a JSON
    /// part and, when present, the image file.
    fn product_form(draft: ProductDraft) -> Result<Form, DomainError> {
        let sizes: Vec<SizeDto> = draft
            .sizes
            .into_iter()
            .map(|s| SizeDto {
                label: s.label,
                price: s.price,
            })
            .collect();
        let sizes_json = serde_json::to_string(&sizes)
            .map_err(|e| DomainError::InvalidPayload(e.to_string()))?;

        let mut form = Form::new()
            .text("nome", draft.name)
            .text("descricao", draft.description)
            .text("tamanhos", sizes_json);
        if let Some(image) = draft.image {
            form = form.part("imagem", Part::bytes(image.bytes).file_name(image.file_name));
        }
        Ok(form)
    }
}

impl StorefrontApi for RestStorefrontApi {
    async fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        let response = self.client.get(self.url("/produtos")).send().await?;
        let dtos: Vec<ProductDto> = Self::check(response).await?.json().await?;
        dtos.into_iter().map(Product::try_from).collect()
    }

    async fn create_product(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        let response = self
            .client
            .post(self.url("/produtos"))
            .multipart(Self::product_form(draft)?)
            .send()
            .await?;
        let dto: ProductDto = Self::check(response).await?.json().await?;
        Product::try_from(dto)
    }

    async fn update_product(&self, id: &str, draft: ProductDraft) -> Result<Product, DomainError> {
        let response = self
            .client
            .put(self.url(&format!("/produtos/{id}")))
            .multipart(Self::product_form(draft)?)
            .send()
            .await?;
        let dto: ProductDto = Self::check(response).await?.json().await?;
        Product::try_from(dto)
    }

    async fn delete_product(&self, id: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .delete(self.url(&format!("/produtos/{id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_complements(&self) -> Result<Vec<Complement>, DomainError> {
        let response = self.client.get(self.url("/complementos")).send().await?;
        let dtos: Vec<ComplementDto> = Self::check(response).await?.json().await?;
        dtos.into_iter().map(Complement::try_from).collect()
    }

    async fn create_complement(&self, draft: ComplementDraft) -> Result<Complement, DomainError> {
        let body = ComplementBody {
            name: draft.name,
            category: draft.category,
            price: draft.price,
            active: draft.active,
        };
        let response = self
            .client
            .post(self.url("/complementos"))
            .json(&body)
            .send()
            .await?;
        let dto: ComplementDto = Self::check(response).await?.json().await?;
        Complement::try_from(dto)
    }

    async fn update_complement(
        &self,
        id: &str,
        draft: ComplementDraft,
    ) -> Result<Complement, DomainError> {
        let body = ComplementBody {
            name: draft.name,
            category: draft.category,
            price: draft.price,
            active: draft.active,
        };
        let response = self
            .client
            .put(self.url(&format!("/complementos/{id}")))
            .json(&body)
            .send()
            .await?;
        let dto: ComplementDto = Self::check(response).await?.json().await?;
        Complement::try_from(dto)
    }

    async fn delete_complement(&self, id: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .delete(self.url(&format!("/complementos/{id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn submit_order(&self, order: &Order) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.url("/pedidos"))
            .json(&OrderDto::from(order))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, DomainError> {
        let response = self.client.get(self.url("/pedidos")).send().await?;
        let dtos: Vec<OrderDto> = Self::check(response).await?.json().await?;
        Ok(dtos.into_iter().map(Order::from).collect())
    }

    async fn fetch_order(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let response = self
            .client
            .get(self.url(&format!("/pedidos/{id}")))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let dto: OrderDto = Self::check(response).await?.json().await?;
        Ok(Some(dto.into()))
    }

    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> Result<(), DomainError> {
        let response = self
            .client
            .patch(self.url(&format!("/pedidos/{id}/status")))
            .json(&StatusBody { status })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
