use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::{Category, NewProduct, Product, ProductId, RecordId};
use crate::service::{CatalogError, CollectionService, Result};

pub fn product(id: u64, name: &str, quantity: u32, category_id: u64) -> Product {
    Product {
        id: RecordId::number(id),
        code: format!("C{id}"),
        name: name.to_string(),
        import_date: "01/01/2020".to_string(),
        quantity,
        category_id: RecordId::number(category_id),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Create(NewProduct),
    Replace(ProductId, Product),
}

/// Collection service double: keeps records in memory, assigns ids like the
/// real service and can be told to fail reads or writes.
pub struct InMemoryCollection {
    products: Mutex<Vec<Product>>,
    categories: Mutex<Vec<Category>>,
    writes: Mutex<Vec<Write>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryCollection {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            categories: Mutex::new(vec![
                Category {
                    id: RecordId::number(1),
                    name: "Shirts".to_string(),
                },
                Category {
                    id: RecordId::number(2),
                    name: "Pants".to_string(),
                },
            ]),
            writes: Mutex::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn stored(&self, id: u64) -> Option<Product> {
        let id = RecordId::number(id);
        self.products.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CatalogError::ServerError { status: 503 });
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CatalogError::ServerError { status: 500 });
        }
        Ok(())
    }
}

#[async_trait]
impl CollectionService for InMemoryCollection {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.check_reads()?;
        Ok(self.products.lock().unwrap().clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.check_reads()?;
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<()> {
        self.check_writes()?;
        self.writes.lock().unwrap().push(Write::Create(product.clone()));

        let mut products = self.products.lock().unwrap();
        let next = products.iter().filter_map(|p| p.id.as_number()).max().unwrap_or(0) + 1;
        products.push(product.clone().with_id(RecordId::number(next)));
        Ok(())
    }

    async fn replace_product(&self, id: &ProductId, product: &Product) -> Result<()> {
        self.check_writes()?;
        self.writes.lock().unwrap().push(Write::Replace(id.clone(), product.clone()));

        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|p| &p.id == id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(())
            }
            None => Err(CatalogError::ServerError { status: 404 }),
        }
    }
}
