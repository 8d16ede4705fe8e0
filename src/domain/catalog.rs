use super::money::Amount;
use serde::{Deserialize, Serialize};

pub type ItemId = u32;

/// An orderable menu entry. Owned by the menu service; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Amount,
}

impl MenuItem {
    pub fn new(id: ItemId, name: impl Into<String>, unit_price: Amount) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
        }
    }
}
