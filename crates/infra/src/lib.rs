//! In-memory collaborator implementations.
//!
//! Test/dev adapters for the three seams the reconciler consumes: the product
//! catalog, the line store, and a movement-backed stock snapshot provider.
//! Production deployments swap these for database-backed implementations.

pub mod catalog;
pub mod line_store;
pub mod moves;

pub use catalog::InMemoryCatalog;
pub use line_store::InMemoryLineStore;
pub use moves::{MovementLedger, StockMove};

#[cfg(test)]
mod integration_tests;
