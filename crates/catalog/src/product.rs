//! Product records and the catalog lookup seam.

use serde::{Deserialize, Serialize};

use stockcount_core::{DomainResult, Entity, ProductId, UomId};

use crate::uom::Uom;

/// Product classification.
///
/// Only `Goods` participate in stock counts; services and assets never carry
/// on-hand quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Goods,
    Service,
    Assets,
}

/// Product catalog record.
///
/// This is a read-side view of a product: the fields stock reconciliation
/// needs, resolved by identity through [`ProductCatalog`] rather than through
/// a live object graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Short code, the product's external display identity.
    pub code: String,
    /// Display name (denormalized onto inventory lines).
    pub name: String,
    pub product_type: ProductType,
    /// Consumables are expensed on receipt and excluded from stock counts.
    pub consumable: bool,
    pub active: bool,
    pub default_uom: UomId,
}

impl Product {
    /// Whether this product may appear on a reconciled inventory.
    ///
    /// Inactive, non-goods, and consumable products are never counted; any
    /// line referencing one is deleted during reconciliation.
    pub fn countable(&self) -> bool {
        self.active && self.product_type == ProductType::Goods && !self.consumable
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Catalog lookup seam.
///
/// Collaborators resolve products and units by identity. Lookups for records
/// that do not exist are domain errors (`DomainError::NotFound`), not `None`:
/// a dangling reference on an inventory line is a data problem the caller
/// must surface, not silently skip.
pub trait ProductCatalog {
    fn product(&self, id: ProductId) -> DomainResult<Product>;

    fn uom(&self, id: UomId) -> DomainResult<Uom>;
}
