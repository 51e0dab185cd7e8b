use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::item::{line_cost, Item, ItemId, ProposedItem};

/// What to do with a proposed item once it has been resolved against a
/// board's existing items: fold into an existing row or create a new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MergeOutcome {
    /// The existing item's unit price is authoritative; the new cost is the
    /// summed quantity at that price, not at the proposal's price.
    Increment { item_id: ItemId, quantity: u32, cost: Decimal },
    Create(ProposedItem),
}

/// Increment-or-create resolution for one proposal. Matching is by the exact
/// null-normalized identity tuple; this is what keeps repeated adds with
/// identical intent idempotent and duplicate-free.
pub fn resolve(existing: &[Item], proposal: &ProposedItem) -> MergeOutcome {
    let identity = proposal.identity();

    match existing.iter().find(|item| item.identity() == identity) {
        Some(item) => {
            let quantity = item.quantity + proposal.quantity;
            MergeOutcome::Increment {
                item_id: item.id.clone(),
                quantity,
                cost: line_cost(item.unit_price, quantity),
            }
        }
        None => MergeOutcome::Create(proposal.clone()),
    }
}

/// Intra-pass dedupe for the synthesizer: proposals sharing an identity are
/// folded into one row with summed quantity, first price wins.
pub fn fold_proposals(proposals: Vec<ProposedItem>) -> Vec<ProposedItem> {
    let mut folded: Vec<ProposedItem> = Vec::with_capacity(proposals.len());

    for proposal in proposals {
        let identity = proposal.identity();
        match folded.iter_mut().find(|existing| existing.identity() == identity) {
            Some(existing) => existing.quantity += proposal.quantity,
            None => folded.push(proposal),
        }
    }

    folded
}
