//! Stock inventory domain module.
//!
//! An [`Inventory`] is a point-in-time stock count at one location; its
//! [`InventoryLine`]s record expected vs. counted quantities per product.
//! The [`Reconciler`] synchronizes the line set of an inventory with the
//! on-hand quantities computed by a [`StockSnapshotProvider`], persisting
//! through a [`LineStore`]. All three collaborator seams are traits; this
//! crate is deterministic domain logic with no storage of its own.

pub mod inventory;
pub mod line;
pub mod reconcile;
pub mod store;

pub use inventory::Inventory;
pub use line::{display_order, InventoryLine, LineUpdate, LineValues, ProductChange};
pub use reconcile::Reconciler;
pub use store::{LineStore, Snapshot, StockLevel, StockSnapshotProvider};
