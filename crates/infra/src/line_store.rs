//! In-memory inventory line store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use stockcount_core::{DomainError, DomainResult, InventoryId, InventoryLineId};
use stockcount_inventory::{display_order, InventoryLine, LineStore, LineUpdate, LineValues};

/// In-memory line store.
///
/// Intended for tests/dev. Counts write and create calls so tests can assert
/// that an already-reconciled inventory produces no writes on a second run.
#[derive(Debug, Default)]
pub struct InMemoryLineStore {
    lines: RwLock<HashMap<InventoryLineId, InventoryLine>>,
    write_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl InMemoryLineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a line directly, bypassing the batched create path.
    pub fn insert(&self, line: InventoryLine) -> DomainResult<()> {
        let mut lines = self
            .lines
            .write()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        lines.insert(line.id, line);
        Ok(())
    }

    pub fn get(&self, id: InventoryLineId) -> DomainResult<InventoryLine> {
        let lines = self
            .lines
            .read()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        lines
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("line {id}")))
    }

    /// Number of `write` calls since construction.
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::Relaxed)
    }

    /// Number of `create` calls since construction.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::Relaxed)
    }
}

impl LineStore for InMemoryLineStore {
    fn lines(&self, inventory: InventoryId) -> DomainResult<Vec<InventoryLine>> {
        let lines = self
            .lines
            .read()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        let mut result: Vec<_> = lines
            .values()
            .filter(|line| line.inventory == inventory)
            .cloned()
            .collect();
        result.sort_by(display_order);
        Ok(result)
    }

    fn create(&self, batch: Vec<LineValues>) -> DomainResult<Vec<InventoryLineId>> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        let mut lines = self
            .lines
            .write()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        let mut ids = Vec::with_capacity(batch.len());
        for values in batch {
            let id = InventoryLineId::new();
            lines.insert(
                id,
                InventoryLine {
                    id,
                    inventory: values.inventory,
                    product: values.product,
                    uom: values.uom,
                    expected_quantity: values.expected_quantity,
                    quantity: values.quantity,
                    name: values.name,
                },
            );
            ids.push(id);
        }
        Ok(ids)
    }

    fn write(&self, line: InventoryLineId, update: &LineUpdate) -> DomainResult<()> {
        self.write_calls.fetch_add(1, Ordering::Relaxed);
        let mut lines = self
            .lines
            .write()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        let line = lines
            .get_mut(&line)
            .ok_or_else(|| DomainError::not_found(format!("line {line}")))?;
        line.apply(update);
        Ok(())
    }

    fn delete(&self, ids: &[InventoryLineId]) -> DomainResult<()> {
        let mut lines = self
            .lines
            .write()
            .map_err(|_| DomainError::store("lock poisoned"))?;
        for id in ids {
            lines.remove(id);
        }
        Ok(())
    }
}
