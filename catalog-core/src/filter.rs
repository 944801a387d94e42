use crate::model::{CategoryId, Product};

/// Search inputs for the product table. Holds no results: the displayed rows
/// are recomputed from the store on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub name_query: String,
    pub category: Option<CategoryId>,
}

impl ProductFilter {
    pub fn new(name_query: impl Into<String>, category: Option<CategoryId>) -> Self {
        Self {
            name_query: name_query.into(),
            category,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name_query.is_empty() && self.category.is_none()
    }

    /// Case-insensitive name substring AND exact category. An empty criterion
    /// matches everything.
    pub fn matches(&self, product: &Product) -> bool {
        let name_matches = self.name_query.is_empty()
            || product
                .name
                .to_lowercase()
                .contains(&self.name_query.to_lowercase());

        let category_matches = self
            .category
            .as_ref()
            .map_or(true, |category| &product.category_id == category);

        name_matches && category_matches
    }

    /// Keeps the input order, so a quantity-sorted list stays sorted.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|product| self.matches(product)).collect()
    }
}
