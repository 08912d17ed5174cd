//! Inventory lines and their create/update value objects.

use core::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockcount_catalog::uom::DEFAULT_UNIT_DIGITS;
use stockcount_catalog::ProductCatalog;
use stockcount_core::{DomainResult, Entity, InventoryId, InventoryLineId, ProductId, UomId};

/// One product's expected vs. counted quantity within an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub id: InventoryLineId,
    pub inventory: InventoryId,
    pub product: ProductId,
    pub uom: UomId,
    /// Snapshot quantity at last reconciliation. Stale between runs.
    pub expected_quantity: Decimal,
    /// Counted quantity, user-editable. Defaults to `max(expected, 0)`.
    pub quantity: Decimal,
    /// Denormalized product display name, kept in sync on product change.
    pub name: String,
}

impl InventoryLine {
    /// External display identity of the line: the product's short code, not
    /// the line's own identifier.
    pub fn rec_name(&self, catalog: &dyn ProductCatalog) -> DomainResult<String> {
        Ok(catalog.product(self.product)?.code)
    }

    /// Field-level diff against the correct (quantity, uom) computed by a
    /// reconciliation pass.
    ///
    /// If counted, expected, and the new quantity already agree and the unit
    /// matches, the diff is empty and no write should happen. Otherwise the
    /// expected quantity and unit are refreshed, and the counted quantity is
    /// refreshed too — but only when the user has not edited it (counted
    /// still equals expected).
    pub fn update_for_complete(&self, quantity: Decimal, uom: UomId) -> LineUpdate {
        let mut update = LineUpdate::default();
        if self.quantity == self.expected_quantity
            && self.expected_quantity == quantity
            && self.uom == uom
        {
            return update;
        }
        if self.expected_quantity != quantity {
            update.expected_quantity = Some(quantity);
        }
        if self.uom != uom {
            update.uom = Some(uom);
        }
        if self.quantity == self.expected_quantity {
            let counted = quantity.max(Decimal::ZERO);
            if self.quantity != counted {
                update.quantity = Some(counted);
            }
        }
        update
    }

    /// Apply an update diff in place.
    pub fn apply(&mut self, update: &LineUpdate) {
        if let Some(expected) = update.expected_quantity {
            self.expected_quantity = expected;
        }
        if let Some(uom) = update.uom {
            self.uom = uom;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
    }
}

impl Entity for InventoryLine {
    type Id = InventoryLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Default listing order for lines: display name ascending, primary sort key
/// ahead of anything else; line id breaks ties deterministically.
pub fn display_order(a: &InventoryLine, b: &InventoryLine) -> Ordering {
    a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id))
}

/// Values for a line to be created by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineValues {
    pub inventory: InventoryId,
    pub product: ProductId,
    pub uom: UomId,
    pub expected_quantity: Decimal,
    pub quantity: Decimal,
    pub name: String,
}

impl LineValues {
    /// Create values for a product discovered by reconciliation.
    ///
    /// Expected keeps the raw snapshot quantity (may be negative, e.g.
    /// returns/overconsumption); counted floors at zero.
    pub fn for_complete(
        inventory: InventoryId,
        product: ProductId,
        quantity: Decimal,
        uom: UomId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            inventory,
            product,
            uom,
            expected_quantity: quantity,
            quantity: quantity.max(Decimal::ZERO),
            name: name.into(),
        }
    }
}

/// Field-level update diff. Only fields whose new value differs from the
/// current line state are populated; an empty diff means no write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineUpdate {
    pub expected_quantity: Option<Decimal>,
    pub uom: Option<UomId>,
    pub quantity: Option<Decimal>,
}

impl LineUpdate {
    pub fn is_empty(&self) -> bool {
        self.expected_quantity.is_none() && self.uom.is_none() && self.quantity.is_none()
    }
}

/// Result of the on-change handler for a line's product reference.
///
/// The unit symbol and digit count are auxiliary, non-persisted fields for UI
/// feedback only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductChange {
    pub name: String,
    pub uom: Option<UomId>,
    pub uom_symbol: Option<String>,
    pub unit_digits: u32,
}

impl ProductChange {
    /// Recompute line display fields after the product reference changed.
    ///
    /// With a product set: unit becomes the product's default, name is
    /// denormalized from the product, and the unit's symbol and precision are
    /// exposed. With the reference cleared: name resets to empty, no unit,
    /// digits back to the default.
    pub fn on_product(
        catalog: &dyn ProductCatalog,
        product: Option<ProductId>,
    ) -> DomainResult<Self> {
        let Some(product) = product else {
            return Ok(Self {
                name: String::new(),
                uom: None,
                uom_symbol: None,
                unit_digits: DEFAULT_UNIT_DIGITS,
            });
        };
        let product = catalog.product(product)?;
        let uom = catalog.uom(product.default_uom)?;
        Ok(Self {
            name: product.name,
            uom: Some(uom.id),
            uom_symbol: Some(uom.symbol),
            unit_digits: uom.digits,
        })
    }
}
