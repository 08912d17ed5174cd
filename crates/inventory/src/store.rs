//! Collaborator seams: stock snapshots and line persistence.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockcount_core::{DomainResult, InventoryId, InventoryLineId, LocationId, ProductId, UomId};

use crate::line::{InventoryLine, LineUpdate, LineValues};

/// Computed on-hand quantity of one product at one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub quantity: Decimal,
    pub uom: UomId,
}

/// On-hand quantities per (location, product) as of a date.
pub type Snapshot = HashMap<(LocationId, ProductId), StockLevel>;

/// Computes stock-on-hand for a set of locations as of a date.
///
/// The as-of date is an explicit parameter: stock as it existed up to and
/// including `as_of`. An unknown location is a fatal error; the reconciler
/// does not recover from it.
pub trait StockSnapshotProvider {
    fn snapshot(&self, locations: &[LocationId], as_of: NaiveDate) -> DomainResult<Snapshot>;
}

/// Persistence seam for inventory lines.
///
/// Implementations are assumed transactional as a unit per reconciliation
/// pass; creation is batched. Writes apply a field-level diff, never a full
/// record overwrite.
pub trait LineStore {
    /// All lines of an inventory, ordered by display name ascending
    /// (ties broken by line id).
    fn lines(&self, inventory: InventoryId) -> DomainResult<Vec<InventoryLine>>;

    /// Create a batch of lines in one call, returning the new ids in order.
    fn create(&self, batch: Vec<LineValues>) -> DomainResult<Vec<InventoryLineId>>;

    /// Apply an update diff to one line.
    fn write(&self, line: InventoryLineId, update: &LineUpdate) -> DomainResult<()>;

    /// Delete lines.
    fn delete(&self, lines: &[InventoryLineId]) -> DomainResult<()>;
}
