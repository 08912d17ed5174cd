//! The inventory record: one stock count event at one location.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockcount_core::{Entity, InventoryId, LocationId};

/// A point-in-time stock count for one location.
///
/// `date` is the as-of cutoff for the stock snapshot: reconciliation compares
/// lines against stock as it existed up to and including that date. Lines are
/// not embedded here; they live in the [`LineStore`](crate::store::LineStore),
/// keyed by this inventory's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: InventoryId,
    pub location: LocationId,
    pub date: NaiveDate,
}

impl Inventory {
    pub fn new(id: InventoryId, location: LocationId, date: NaiveDate) -> Self {
        Self { id, location, date }
    }
}

impl Entity for Inventory {
    type Id = InventoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
