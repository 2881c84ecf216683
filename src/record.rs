//! The inventory record stored at every tree node.

/// Unique key of an inventory record.
pub type ItemId = i64;

/// One inventory entry.
///
/// The tree is keyed by [`Record::id`]; every other field is payload that may
/// be replaced in place without touching the tree's shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    /// Unit price. Callers are expected to keep this non-negative.
    pub price: f64,
    pub quantity: i64,
}

impl Record {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            quantity,
        }
    }

    /// Stock value of this record: `price * quantity`.
    #[inline]
    pub fn value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
