//! Reconciliation of inventory lines against computed stock.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, info};

use stockcount_catalog::{Product, ProductCatalog};
use stockcount_core::{DomainResult, ProductId};

use crate::inventory::Inventory;
use crate::line::LineValues;
use crate::store::{LineStore, StockLevel, StockSnapshotProvider};

/// Synchronizes an inventory's line set with actual stock levels.
///
/// For each inventory the reconciler computes the stock snapshot at the
/// inventory's location as of its date, deletes lines whose product is no
/// longer countable, updates lines whose expected quantity or unit drifted,
/// and creates lines for countable products with nonzero stock that have no
/// line yet. New lines are staged across all inventories and created in one
/// batch at the end.
///
/// Atomicity is the caller's concern: all reads and writes of one call are
/// expected to run inside one surrounding transaction, and a failure leaves
/// rollback to that transaction. No partial-success mode exists here.
pub struct Reconciler<'a> {
    snapshots: &'a dyn StockSnapshotProvider,
    catalog: &'a dyn ProductCatalog,
    lines: &'a dyn LineStore,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        snapshots: &'a dyn StockSnapshotProvider,
        catalog: &'a dyn ProductCatalog,
        lines: &'a dyn LineStore,
    ) -> Self {
        Self {
            snapshots,
            catalog,
            lines,
        }
    }

    /// Complete or update the given inventories.
    ///
    /// Errors from the snapshot provider or the catalog (unknown location,
    /// dangling product reference) propagate immediately.
    pub fn complete(&self, inventories: &[Inventory]) -> DomainResult<()> {
        let mut to_create: Vec<LineValues> = Vec::new();

        for inventory in inventories {
            debug!(
                inventory = %inventory.id,
                location = %inventory.location,
                date = %inventory.date,
                "computing stock snapshot"
            );
            let snapshot = self
                .snapshots
                .snapshot(&[inventory.location], inventory.date)?;

            // Index catalog data for every product the snapshot knows.
            let mut indexed: HashMap<ProductId, Product> = HashMap::new();
            for &(_, product_id) in snapshot.keys() {
                if !indexed.contains_key(&product_id) {
                    indexed.insert(product_id, self.catalog.product(product_id)?);
                }
            }

            // Working pool of unconsumed snapshot quantities at this location.
            let mut pool: HashMap<ProductId, StockLevel> = snapshot
                .into_iter()
                .filter(|((location, _), _)| *location == inventory.location)
                .map(|((_, product), level)| (product, level))
                .collect();

            let existing = self.lines.lines(inventory.id)?;
            let mut deleted = 0usize;
            let mut updated = 0usize;
            for line in &existing {
                let product = match indexed.get(&line.product) {
                    Some(product) => product.clone(),
                    None => self.catalog.product(line.product)?,
                };
                if !product.countable() {
                    // Not eligible for counting; the pool entry, if any,
                    // stays unconsumed and is filtered again below.
                    self.lines.delete(&[line.id])?;
                    deleted += 1;
                    continue;
                }

                let (quantity, uom) = if let Some(level) = pool.remove(&line.product) {
                    (level.quantity, level.uom)
                } else if let Some(known) = indexed.get(&line.product) {
                    // Known at this location but zero computed stock.
                    (Decimal::ZERO, known.default_uom)
                } else {
                    // Never stocked at this location at all. Falls back to
                    // the product's own default unit, not the unit currently
                    // on the line.
                    (Decimal::ZERO, product.default_uom)
                };

                let update = line.update_for_complete(quantity, uom);
                if !update.is_empty() {
                    self.lines.write(line.id, &update)?;
                    updated += 1;
                }
            }

            // Products with stock but no line yet.
            let mut staged = 0usize;
            for (product_id, level) in pool {
                let product = &indexed[&product_id];
                if !product.countable() {
                    continue;
                }
                if level.quantity.is_zero() {
                    continue;
                }
                to_create.push(LineValues::for_complete(
                    inventory.id,
                    product_id,
                    level.quantity,
                    level.uom,
                    product.name.clone(),
                ));
                staged += 1;
            }

            debug!(
                inventory = %inventory.id,
                deleted,
                updated,
                staged,
                "inventory reconciled"
            );
        }

        if !to_create.is_empty() {
            let created = self.lines.create(to_create)?;
            info!(created = created.len(), "created inventory lines");
        }
        Ok(())
    }
}
