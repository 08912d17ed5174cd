//! Product catalog domain module.
//!
//! This crate contains the product and unit-of-measure records the stock
//! domain reads, plus the [`ProductCatalog`] seam collaborators implement.
//! It is pure domain logic (no IO, no storage).

pub mod product;
pub mod uom;

pub use product::{Product, ProductCatalog, ProductType};
pub use uom::Uom;
