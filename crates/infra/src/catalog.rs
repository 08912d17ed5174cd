//! In-memory product catalog.

use std::collections::HashMap;
use std::sync::RwLock;

use stockcount_catalog::{Product, ProductCatalog, Uom};
use stockcount_core::{DomainError, DomainResult, ProductId, UomId};

/// In-memory catalog keyed by product/uom id.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    uoms: RwLock<HashMap<UomId, Uom>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_product(&self, product: Product) -> DomainResult<()> {
        let mut products = self
            .products
            .write()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        products.insert(product.id, product);
        Ok(())
    }

    pub fn add_uom(&self, uom: Uom) -> DomainResult<()> {
        let mut uoms = self
            .uoms
            .write()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        uoms.insert(uom.id, uom);
        Ok(())
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn product(&self, id: ProductId) -> DomainResult<Product> {
        let products = self
            .products
            .read()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        products
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))
    }

    fn uom(&self, id: UomId) -> DomainResult<Uom> {
        let uoms = self
            .uoms
            .read()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        uoms.get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("uom {id}")))
    }
}
