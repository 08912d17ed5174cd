//! End-to-end reconciliation tests over the in-memory adapters.
//!
//! Wires MovementLedger + InMemoryCatalog + InMemoryLineStore into the
//! Reconciler and checks the full behavior: deletes of non-countable lines,
//! field-level updates, batched creates, and idempotence of a second run.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use stockcount_catalog::{Product, ProductType, Uom};
use stockcount_core::{
    DomainResult, InventoryId, InventoryLineId, LocationId, ProductId, UomId,
};
use stockcount_inventory::{Inventory, InventoryLine, LineStore, Reconciler};

use crate::{InMemoryCatalog, InMemoryLineStore, MovementLedger, StockMove};

struct World {
    catalog: InMemoryCatalog,
    ledger: MovementLedger,
    store: InMemoryLineStore,
    location: LocationId,
    unit: Uom,
}

impl World {
    fn new() -> Self {
        stockcount_observability::init();
        let catalog = InMemoryCatalog::new();
        let unit = Uom::new(UomId::new(), "unit", 2);
        catalog.add_uom(unit.clone()).unwrap();
        let ledger = MovementLedger::new();
        let location = LocationId::new();
        ledger.add_location(location).unwrap();
        Self {
            catalog,
            ledger,
            store: InMemoryLineStore::new(),
            location,
            unit,
        }
    }

    fn goods(&self, name: &str, code: &str) -> Product {
        let product = Product {
            id: ProductId::new(),
            code: code.to_string(),
            name: name.to_string(),
            product_type: ProductType::Goods,
            consumable: false,
            active: true,
            default_uom: self.unit.id,
        };
        self.catalog.add_product(product.clone()).unwrap();
        product
    }

    fn add_product(&self, product: Product) {
        self.catalog.add_product(product).unwrap();
    }

    fn receive(&self, product: &Product, quantity: i64, day: u32) {
        self.ledger
            .record(StockMove {
                product: product.id,
                location: self.location,
                quantity: Decimal::from(quantity),
                uom: product.default_uom,
                effective: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            })
            .unwrap();
    }

    fn inventory(&self, day: u32) -> Inventory {
        Inventory::new(
            InventoryId::new(),
            self.location,
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        )
    }

    fn seed_line(&self, inventory: &Inventory, product: &Product, expected: i64, counted: i64) {
        self.store
            .insert(InventoryLine {
                id: InventoryLineId::new(),
                inventory: inventory.id,
                product: product.id,
                uom: product.default_uom,
                expected_quantity: Decimal::from(expected),
                quantity: Decimal::from(counted),
                name: product.name.clone(),
            })
            .unwrap();
    }

    fn complete(&self, inventories: &[Inventory]) -> DomainResult<()> {
        Reconciler::new(&self.ledger, &self.catalog, &self.store).complete(inventories)
    }
}

#[test]
fn end_to_end_reconciliation_scenario() {
    let world = World::new();
    let product_a = world.goods("Product A", "A");
    let product_b = world.goods("Product B", "B");
    let product_c = Product {
        id: ProductId::new(),
        code: "C".to_string(),
        name: "Product C".to_string(),
        product_type: ProductType::Goods,
        consumable: true,
        active: true,
        default_uom: world.unit.id,
    };
    world.add_product(product_c.clone());

    world.receive(&product_a, 10, 1);
    // Product B moved but nets to zero by the count date.
    world.receive(&product_b, 4, 1);
    world.receive(&product_b, -4, 2);

    let inventory = world.inventory(15);
    world.seed_line(&inventory, &product_a, 5, 5);
    world.seed_line(&inventory, &product_c, 3, 3);

    world.complete(std::slice::from_ref(&inventory)).unwrap();

    let lines = world.store.lines(inventory.id).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product, product_a.id);
    assert_eq!(lines[0].expected_quantity, Decimal::from(10));
    assert_eq!(lines[0].quantity, Decimal::from(10));
}

#[test]
fn moves_after_the_count_date_are_invisible() {
    let world = World::new();
    let product = world.goods("Widget", "W");
    world.receive(&product, 5, 1);
    world.receive(&product, 20, 20);

    let inventory = world.inventory(10);
    world.complete(std::slice::from_ref(&inventory)).unwrap();

    let lines = world.store.lines(inventory.id).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].expected_quantity, Decimal::from(5));
}

#[test]
fn zero_stock_product_without_line_gets_none() {
    let world = World::new();
    let product = world.goods("Widget", "W");
    world.receive(&product, 8, 1);
    world.receive(&product, -8, 2);

    let inventory = world.inventory(10);
    world.complete(std::slice::from_ref(&inventory)).unwrap();

    assert!(world.store.lines(inventory.id).unwrap().is_empty());
}

#[test]
fn zero_stock_product_with_line_is_updated_not_deleted() {
    let world = World::new();
    let product = world.goods("Widget", "W");
    world.receive(&product, 8, 1);
    world.receive(&product, -8, 2);

    let inventory = world.inventory(10);
    world.seed_line(&inventory, &product, 8, 8);
    world.complete(std::slice::from_ref(&inventory)).unwrap();

    let lines = world.store.lines(inventory.id).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].expected_quantity, Decimal::ZERO);
    assert_eq!(lines[0].quantity, Decimal::ZERO);
}

#[test]
fn negative_stock_creates_line_with_floored_count() {
    let world = World::new();
    let product = world.goods("Returned Widget", "R");
    world.receive(&product, -2, 1);

    let inventory = world.inventory(10);
    world.complete(std::slice::from_ref(&inventory)).unwrap();

    let lines = world.store.lines(inventory.id).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].expected_quantity, Decimal::from(-2));
    assert_eq!(lines[0].quantity, Decimal::ZERO);
}

#[test]
fn user_edited_count_survives_re_reconciliation() {
    let world = World::new();
    let product = world.goods("Widget", "W");
    world.receive(&product, 10, 1);

    let inventory = world.inventory(10);
    // Counted 7 differs from expected 9: the user already adjusted it.
    world.seed_line(&inventory, &product, 9, 7);
    world.complete(std::slice::from_ref(&inventory)).unwrap();

    let lines = world.store.lines(inventory.id).unwrap();
    assert_eq!(lines[0].expected_quantity, Decimal::from(10));
    assert_eq!(lines[0].quantity, Decimal::from(7));
}

#[test]
fn second_run_is_a_no_op() {
    let world = World::new();
    let product_a = world.goods("Product A", "A");
    let product_b = world.goods("Product B", "B");
    world.receive(&product_a, 10, 1);
    world.receive(&product_b, 3, 1);

    let inventory = world.inventory(10);
    world.seed_line(&inventory, &product_a, 5, 5);

    world.complete(std::slice::from_ref(&inventory)).unwrap();
    let creates = world.store.create_calls();
    let writes = world.store.write_calls();

    world.complete(std::slice::from_ref(&inventory)).unwrap();
    assert_eq!(world.store.create_calls(), creates);
    assert_eq!(world.store.write_calls(), writes);
}

#[test]
fn no_ineligible_line_survives_reconciliation() {
    let world = World::new();
    let mut inactive = world.goods("Old Widget", "OLD");
    inactive.active = false;
    world.add_product(inactive.clone());
    let mut service = world.goods("Install Service", "SRV");
    service.product_type = ProductType::Service;
    world.add_product(service.clone());
    let mut consumable = world.goods("Packing Foam", "FOAM");
    consumable.consumable = true;
    world.add_product(consumable.clone());
    let kept = world.goods("Widget", "W");
    world.receive(&kept, 2, 1);

    let inventory = world.inventory(10);
    for product in [&inactive, &service, &consumable, &kept] {
        world.seed_line(&inventory, product, 1, 1);
    }
    world.complete(std::slice::from_ref(&inventory)).unwrap();

    let lines = world.store.lines(inventory.id).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product, kept.id);
}

#[test]
fn multiple_inventories_share_one_create_batch() {
    let world = World::new();
    let other_location = LocationId::new();
    world.ledger.add_location(other_location).unwrap();
    let product = world.goods("Widget", "W");
    world.receive(&product, 6, 1);
    world
        .ledger
        .record(StockMove {
            product: product.id,
            location: other_location,
            quantity: Decimal::from(2),
            uom: product.default_uom,
            effective: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        })
        .unwrap();

    let first = world.inventory(10);
    let second = Inventory::new(
        InventoryId::new(),
        other_location,
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
    );
    world.complete(&[first.clone(), second.clone()]).unwrap();

    assert_eq!(world.store.create_calls(), 1);
    assert_eq!(world.store.lines(first.id).unwrap().len(), 1);
    let second_lines = world.store.lines(second.id).unwrap();
    assert_eq!(second_lines.len(), 1);
    assert_eq!(second_lines[0].expected_quantity, Decimal::from(2));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// After reconciliation, every countable product with nonzero stock
        /// has exactly one line with the snapshot quantity, and a second run
        /// performs no writes.
        #[test]
        fn reconciliation_invariants_hold(
            quantities in proptest::collection::vec(-50i64..50, 1..8),
            seeded in proptest::collection::vec(any::<bool>(), 1..8),
        ) {
            let world = World::new();
            let inventory = world.inventory(10);
            let mut products = Vec::new();
            for (i, &quantity) in quantities.iter().enumerate() {
                let product = world.goods(&format!("Product {i}"), &format!("P{i}"));
                if quantity != 0 {
                    world.receive(&product, quantity, 1);
                }
                if seeded.get(i).copied().unwrap_or(false) {
                    world.seed_line(&inventory, &product, 1, 1);
                }
                products.push((product, quantity));
            }

            world.complete(std::slice::from_ref(&inventory)).unwrap();
            let lines = world.store.lines(inventory.id).unwrap();

            for (product, quantity) in &products {
                let matching: Vec<_> =
                    lines.iter().filter(|l| l.product == product.id).collect();
                if *quantity != 0 {
                    prop_assert_eq!(matching.len(), 1);
                    prop_assert_eq!(
                        matching[0].expected_quantity,
                        Decimal::from(*quantity)
                    );
                    prop_assert_eq!(
                        matching[0].quantity,
                        Decimal::from(*quantity).max(Decimal::ZERO)
                    );
                } else {
                    // Zero stock: a pre-seeded line is kept at zero, none is
                    // created otherwise.
                    prop_assert!(matching.len() <= 1);
                    if let Some(line) = matching.first() {
                        prop_assert_eq!(line.expected_quantity, Decimal::ZERO);
                    }
                }
            }

            let creates = world.store.create_calls();
            let writes = world.store.write_calls();
            world.complete(std::slice::from_ref(&inventory)).unwrap();
            prop_assert_eq!(world.store.create_calls(), creates);
            prop_assert_eq!(world.store.write_calls(), writes);
        }
    }
}
