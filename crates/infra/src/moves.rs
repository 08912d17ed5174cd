//! Movement-backed stock snapshot provider.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use stockcount_core::{DomainError, DomainResult, LocationId, ProductId, UomId};
use stockcount_inventory::{Snapshot, StockLevel, StockSnapshotProvider};

/// A signed stock movement at one location.
///
/// Positive quantities are receipts, negative ones issues. Quantities are
/// expressed in the product's default unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockMove {
    pub product: ProductId,
    pub location: LocationId,
    pub quantity: Decimal,
    pub uom: UomId,
    pub effective: NaiveDate,
}

/// Snapshot provider backed by a ledger of stock moves.
///
/// On-hand quantity of a product at a location as of a date is the sum of
/// all moves with `effective <= as_of`. Products that have moved at a
/// location appear in the snapshot even when their net quantity is zero;
/// that distinction drives the reconciler's zero-stock update branch.
#[derive(Debug, Default)]
pub struct MovementLedger {
    locations: RwLock<HashSet<LocationId>>,
    moves: RwLock<Vec<StockMove>>,
}

impl MovementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location. Snapshots for unregistered locations fail.
    pub fn add_location(&self, location: LocationId) -> DomainResult<()> {
        let mut locations = self
            .locations
            .write()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        locations.insert(location);
        Ok(())
    }

    pub fn record(&self, stock_move: StockMove) -> DomainResult<()> {
        let locations = self
            .locations
            .read()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        if !locations.contains(&stock_move.location) {
            return Err(DomainError::not_found(format!(
                "location {}",
                stock_move.location
            )));
        }
        drop(locations);
        let mut moves = self
            .moves
            .write()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        moves.push(stock_move);
        Ok(())
    }
}

impl StockSnapshotProvider for MovementLedger {
    fn snapshot(&self, locations: &[LocationId], as_of: NaiveDate) -> DomainResult<Snapshot> {
        let known = self
            .locations
            .read()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        for location in locations {
            if !known.contains(location) {
                return Err(DomainError::not_found(format!("location {location}")));
            }
        }
        drop(known);

        let moves = self
            .moves
            .read()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        let mut snapshot: HashMap<(LocationId, ProductId), StockLevel> = HashMap::new();
        for m in moves.iter() {
            if m.effective > as_of || !locations.contains(&m.location) {
                continue;
            }
            snapshot
                .entry((m.location, m.product))
                .and_modify(|level| level.quantity += m.quantity)
                .or_insert(StockLevel {
                    quantity: m.quantity,
                    uom: m.uom,
                });
        }
        debug!(products = snapshot.len(), %as_of, "computed stock snapshot");
        Ok(snapshot)
    }
}
