use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Category, NewProduct, Product, ProductId};

/// Failure talking to the collection service. Callers do not distinguish
/// "not found", "conflict" and "server error": they all surface as one
/// generic message, with the detail kept for the log.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Server error: {status}")]
    ServerError { status: u16 },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// The four operations the catalog relies on. Everything else about the
/// remote collection (storage, id assignment, ordering) is its own business.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CollectionService {
    async fn list_products(&self) -> Result<Vec<Product>>;

    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn create_product(&self, product: &NewProduct) -> Result<()>;

    async fn replace_product(&self, id: &ProductId, product: &Product) -> Result<()>;
}
