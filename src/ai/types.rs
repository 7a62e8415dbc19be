//! Typed records returned by the assistant

use crate::split::BillItem;
use serde::{Deserialize, Serialize};

/// One line of a generated shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub item: String,
    pub quantity: String,
    #[serde(default)]
    pub estimated_price: f64,
    #[serde(default)]
    pub alcoholic: bool,
}

/// Shopping list for a barbecue, grouped by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub people: Option<u32>,
    #[serde(default)]
    pub meats: Vec<ShoppingItem>,
    #[serde(default)]
    pub drinks: Vec<ShoppingItem>,
    #[serde(default)]
    pub sides: Vec<ShoppingItem>,
    #[serde(default)]
    pub charcoal_and_ice: Vec<ShoppingItem>,
    #[serde(default)]
    pub estimated_total: f64,
}

impl ShoppingList {
    /// Every item, category by category
    pub fn items(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.meats
            .iter()
            .chain(&self.drinks)
            .chain(&self.sides)
            .chain(&self.charcoal_and_ice)
    }

    /// Sum of the item estimates, independent of the model's own total
    pub fn items_total(&self) -> f64 {
        self.items().map(|i| i.estimated_price).sum()
    }
}

/// Items read from a supermarket receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub items: Vec<BillItem>,
    #[serde(default)]
    pub receipt_total: Option<f64>,
    #[serde(default, alias = "alcoholic_total")]
    pub restricted_total: Option<f64>,
    #[serde(default, alias = "non_alcoholic_total")]
    pub unrestricted_total: Option<f64>,
}

impl Receipt {
    /// Total printed on the receipt, or the sum of the items when unreadable
    pub fn total(&self) -> f64 {
        self.receipt_total
            .unwrap_or_else(|| self.items.iter().map(|i| i.price).sum())
    }

    pub fn to_bill_items(&self) -> Vec<BillItem> {
        self.items.clone()
    }
}
