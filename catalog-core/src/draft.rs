use crate::model::{CategoryId, Product, ProductId};

/// Form buffers for one product. Text fields hold exactly what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFields {
    pub code: String,
    pub name: String,
    pub import_date: String,
    pub quantity: String,
    pub category_id: Option<CategoryId>,
}

impl ProductFields {
    pub fn from_product(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            name: product.name.clone(),
            import_date: product.import_date.clone(),
            quantity: product.quantity.to_string(),
            category_id: Some(product.category_id.clone()),
        }
    }
}

/// An in-progress, unsaved product. Whether saving creates or replaces is
/// decided by the variant, never by inspecting the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    New(ProductFields),
    Existing(ProductId, ProductFields),
}

impl Draft {
    pub fn empty() -> Self {
        Draft::New(ProductFields::default())
    }

    /// Copies the product's values; editing the draft never touches the source.
    pub fn from_product(product: &Product) -> Self {
        Draft::Existing(product.id.clone(), ProductFields::from_product(product))
    }

    pub fn id(&self) -> Option<&ProductId> {
        match self {
            Draft::New(_) => None,
            Draft::Existing(id, _) => Some(id),
        }
    }

    pub fn fields(&self) -> &ProductFields {
        match self {
            Draft::New(fields) | Draft::Existing(_, fields) => fields,
        }
    }

    pub fn fields_mut(&mut self) -> &mut ProductFields {
        match self {
            Draft::New(fields) | Draft::Existing(_, fields) => fields,
        }
    }
}
