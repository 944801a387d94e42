use crate::filter::ProductFilter;
use crate::model::{Category, CategoryId, Product, ProductId, UNKNOWN_CATEGORY};
use crate::service::{CollectionService, Result};

/// One displayed table row: the product plus its resolved category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductRow<'a> {
    pub product: &'a Product,
    pub category: &'a str,
}

/// Last-fetched products and categories. Both lists are replaced wholesale on
/// each successful fetch and kept as they were when a fetch fails.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted by ascending quantity.
    pub fn current_products(&self) -> &[Product] {
        &self.products
    }

    /// In service order.
    pub fn current_categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn replace_products(&mut self, mut products: Vec<Product>) {
        products.sort_by_key(|product| product.quantity);
        self.products = products;
    }

    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// Takes the outcome of a product fetch. On failure the previous list is
    /// retained and the error goes to the log only. Returns whether the list
    /// was replaced.
    pub fn apply_products(&mut self, fetched: Result<Vec<Product>>) -> bool {
        match fetched {
            Ok(products) => {
                self.replace_products(products);
                true
            }
            Err(e) => {
                log::error!("Error fetching products: {}", e);
                false
            }
        }
    }

    pub fn apply_categories(&mut self, fetched: Result<Vec<Category>>) -> bool {
        match fetched {
            Ok(categories) => {
                self.replace_categories(categories);
                true
            }
            Err(e) => {
                log::error!("Error fetching categories: {}", e);
                false
            }
        }
    }

    pub async fn refresh_products<S>(&mut self, service: &S) -> bool
    where
        S: CollectionService + ?Sized,
    {
        let fetched = service.list_products().await;
        self.apply_products(fetched)
    }

    pub async fn refresh_categories<S>(&mut self, service: &S) -> bool
    where
        S: CollectionService + ?Sized,
    {
        let fetched = service.list_categories().await;
        self.apply_categories(fetched)
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    pub fn category_name(&self, id: &CategoryId) -> &str {
        self.category(id)
            .map(|category| category.name.as_str())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    /// Rows to display for the given search inputs, in quantity order.
    pub fn rows(&self, filter: &ProductFilter) -> Vec<ProductRow<'_>> {
        filter
            .apply(&self.products)
            .into_iter()
            .map(|product| ProductRow {
                product,
                category: self.category_name(&product.category_id),
            })
            .collect()
    }
}
