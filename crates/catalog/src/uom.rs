//! Units of measure.

use serde::{Deserialize, Serialize};

use stockcount_core::{Entity, UomId};

/// Number of decimal digits shown for a quantity when no unit is known.
pub const DEFAULT_UNIT_DIGITS: u32 = 2;

/// Unit of measure record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uom {
    pub id: UomId,
    /// Display text, e.g. "kg" or "unit".
    pub symbol: String,
    /// Decimal digits of precision shown for quantities in this unit.
    pub digits: u32,
}

impl Uom {
    pub fn new(id: UomId, symbol: impl Into<String>, digits: u32) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            digits,
        }
    }
}

impl Entity for Uom {
    type Id = UomId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
