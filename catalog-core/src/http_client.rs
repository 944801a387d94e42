use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ServiceConfig;
use crate::model::{Category, NewProduct, Product, ProductId};
use crate::service::{CatalogError, CollectionService, Result};

/// `reqwest` client for the product/category collection endpoints.
#[derive(Debug, Clone)]
pub struct CollectionClient {
    client: Client,
    base_url: String,
}

impl CollectionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            client: build_client(config),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn categories_url(&self) -> String {
        format!("{}/categories", self.base_url)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &ServiceConfig) -> Client {
    let builder =
        Client::builder().timeout(std::time::Duration::from_secs(config.timeout_seconds));

    match builder.build() {
        Ok(client) => client,
        Err(e) => {
            log::warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        }
    }
}

// Browsers own request timeouts.
#[cfg(target_arch = "wasm32")]
fn build_client(_config: &ServiceConfig) -> Client {
    Client::new()
}

/// Decodes a JSON array record by record. A record that does not fit the
/// model is logged and skipped so it cannot hide the rest of the collection;
/// a body that is not an array at all is still an error.
fn decode_records<T: DeserializeOwned>(body: &[u8], kind: &str) -> Result<Vec<T>> {
    let raw: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    let total = raw.len();

    let records: Vec<T> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping unreadable {} record #{}: {}", kind, index, e);
                None
            }
        })
        .collect();

    if records.len() < total {
        log::warn!("{} of {} {} records skipped", total - records.len(), total, kind);
    }
    Ok(records)
}

fn ensure_success(response: Response) -> Result<Response> {
    if !response.status().is_success() {
        return Err(CatalogError::ServerError {
            status: response.status().as_u16(),
        });
    }
    Ok(response)
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CollectionService for CollectionClient {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let url = self.products_url();
        log::debug!("Fetching products: {}", url);

        let response = ensure_success(self.client.get(&url).send().await?)?;
        let body = response.bytes().await?;
        let products: Vec<Product> = decode_records(&body, "product")?;

        log::info!("Products fetched: {}", products.len());
        Ok(products)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let url = self.categories_url();
        log::debug!("Fetching categories: {}", url);

        let response = ensure_success(self.client.get(&url).send().await?)?;
        let body = response.bytes().await?;
        let categories: Vec<Category> = decode_records(&body, "category")?;

        log::info!("Categories fetched: {}", categories.len());
        Ok(categories)
    }

    async fn create_product(&self, product: &NewProduct) -> Result<()> {
        let url = self.products_url();
        log::debug!("Creating product '{}': {}", product.name, url);

        ensure_success(self.client.post(&url).json(product).send().await?)?;
        Ok(())
    }

    async fn replace_product(&self, id: &ProductId, product: &Product) -> Result<()> {
        let url = format!("{}/{}", self.products_url(), id);
        log::debug!("Replacing product {}: {}", id, url);

        ensure_success(self.client.put(&url).json(product).send().await?)?;
        Ok(())
    }
}
