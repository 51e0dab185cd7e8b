use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::board::BoardId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

/// Deduplication key for line items on a board. A missing subcategory or
/// description compares equal to an explicit null, never to an empty string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemIdentity {
    pub category: String,
    pub subcategory: Option<String>,
    pub name: String,
    pub description: Option<String>,
}

impl ItemIdentity {
    pub fn new(
        category: impl Into<String>,
        subcategory: Option<String>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            category: category.into(),
            subcategory: normalize(subcategory),
            name: name.into(),
            description: normalize(description),
        }
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Currency-precision line cost. The `cost` field on an [`Item`] is always
/// this product, recomputed on every mutation.
pub fn line_cost(unit_price: Decimal, quantity: u32) -> Decimal {
    (unit_price * Decimal::from(quantity)).round_dp(2)
}

/// A line item a synthesis rule (or a manual add) wants on a board, before
/// it has been reconciled against the board's persisted items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProposedItem {
    pub category: String,
    pub subcategory: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub labour_hours: Decimal,
}

impl ProposedItem {
    pub fn identity(&self) -> ItemIdentity {
        ItemIdentity::new(
            self.category.clone(),
            self.subcategory.clone(),
            self.name.clone(),
            self.description.clone(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub board_id: BoardId,
    pub category: String,
    pub subcategory: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub labour_hours: Decimal,
    pub cost: Decimal,
    pub is_default: bool,
    pub notes: Option<String>,
    pub position: u32,
}

impl Item {
    pub fn from_proposal(
        id: ItemId,
        board_id: BoardId,
        proposal: ProposedItem,
        is_default: bool,
        position: u32,
    ) -> Self {
        let cost = line_cost(proposal.unit_price, proposal.quantity);
        Self {
            id,
            board_id,
            category: proposal.category,
            subcategory: normalize(proposal.subcategory),
            name: proposal.name,
            description: normalize(proposal.description),
            quantity: proposal.quantity,
            unit_price: proposal.unit_price,
            labour_hours: proposal.labour_hours,
            cost,
            is_default,
            notes: None,
            position,
        }
    }

    pub fn identity(&self) -> ItemIdentity {
        ItemIdentity::new(
            self.category.clone(),
            self.subcategory.clone(),
            self.name.clone(),
            self.description.clone(),
        )
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.cost = line_cost(self.unit_price, self.quantity);
    }

    pub fn reprice(&mut self, unit_price: Decimal, labour_hours: Decimal) {
        self.unit_price = unit_price;
        self.labour_hours = labour_hours;
        self.cost = line_cost(self.unit_price, self.quantity);
    }
}
