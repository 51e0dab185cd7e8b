use serde::{Deserialize, Serialize};

use crate::domain::board::BoardId;
use crate::domain::item::{Item, ItemId, ProposedItem};
use crate::errors::DomainError;

/// The minimal set of operations that brings a board's persisted items in
/// line with what its configuration implies. Apply as one atomic unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub to_create: Vec<ProposedItem>,
    pub to_update: Vec<Item>,
    pub to_delete: Vec<ItemId>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

/// Diffs the synthesizer's target set against the board's current items.
///
/// Ownership rides on each item's `is_default` flag, stamped at creation:
/// synthesis output is system-owned, manual adds are not. Partitioning on
/// the flag rather than the part name keeps items whose display name came
/// from a catalog description (blank part number) under system control.
///
/// Only system-owned items participate: proposals overwrite matching ones,
/// unmatched system-owned items are deleted, user-owned items are never
/// touched. A proposal whose identity lands on a user-owned item is a hard
/// error; merging system output into user data would corrupt it silently.
///
/// Running the reconcile twice with unchanged inputs yields an empty
/// [`ChangeSet`] on the second run, which is what makes "reconcile again"
/// always a safe retry.
pub fn reconcile(
    board_id: &BoardId,
    proposed: &[ProposedItem],
    existing: &[Item],
) -> Result<ChangeSet, DomainError> {
    let (system_owned, user_owned): (Vec<&Item>, Vec<&Item>) =
        existing.iter().partition(|item| item.is_default);

    let mut changes = ChangeSet::default();
    let mut matched: Vec<&ItemId> = Vec::new();

    for proposal in proposed {
        let identity = proposal.identity();

        if let Some(current) = system_owned.iter().find(|item| item.identity() == identity) {
            matched.push(&current.id);

            let unchanged = current.quantity == proposal.quantity
                && current.unit_price == proposal.unit_price
                && current.labour_hours == proposal.labour_hours;
            if unchanged {
                continue;
            }

            let mut updated = (*current).clone();
            updated.set_quantity(proposal.quantity);
            updated.reprice(proposal.unit_price, proposal.labour_hours);
            changes.to_update.push(updated);
            continue;
        }

        if user_owned.iter().any(|item| item.identity() == identity) {
            return Err(DomainError::IdentityConflict {
                board_id: board_id.0.clone(),
                name: proposal.name.clone(),
            });
        }

        changes.to_create.push(proposal.clone());
    }

    for item in system_owned {
        if !matched.contains(&&item.id) {
            changes.to_delete.push(item.id.clone());
        }
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::board::BoardId;
    use crate::domain::item::{Item, ItemId, ProposedItem};
    use crate::errors::DomainError;

    use super::reconcile;

    fn board_id() -> BoardId {
        BoardId("board-1".to_owned())
    }

    fn proposal(name: &str, quantity: u32, unit_price: Decimal) -> ProposedItem {
        ProposedItem {
            category: "Switchboard".to_owned(),
            subcategory: Some("Tiers".to_owned()),
            name: name.to_owned(),
            description: None,
            quantity,
            unit_price,
            labour_hours: Decimal::new(25, 1),
        }
    }

    fn item(name: &str, quantity: u32, unit_price: Decimal, is_default: bool) -> Item {
        Item::from_proposal(
            ItemId(format!("item-{name}")),
            board_id(),
            proposal(name, quantity, unit_price),
            is_default,
            0,
        )
    }

    #[test]
    fn new_proposals_become_creates() {
        let changes =
            reconcile(&board_id(), &[proposal("SB-TIER", 2, Decimal::new(105_000, 2))], &[])
                .expect("reconcile");

        assert_eq!(changes.to_create.len(), 1);
        assert!(changes.to_update.is_empty());
        assert!(changes.to_delete.is_empty());
    }

    #[test]
    fn changed_quantity_and_price_become_an_update() {
        let existing = vec![item("SB-TIER", 1, Decimal::new(120_000, 2), true)];
        let changes =
            reconcile(&board_id(), &[proposal("SB-TIER", 2, Decimal::new(105_000, 2))], &existing)
                .expect("reconcile");

        assert_eq!(changes.to_update.len(), 1);
        let updated = &changes.to_update[0];
        assert_eq!(updated.quantity, 2);
        assert_eq!(updated.unit_price, Decimal::new(105_000, 2));
        assert_eq!(updated.cost, Decimal::new(210_000, 2));
        assert!(changes.to_create.is_empty());
        assert!(changes.to_delete.is_empty());
    }

    #[test]
    fn orphaned_system_owned_items_are_deleted() {
        let existing = vec![item("SB-TIER", 2, Decimal::new(105_000, 2), true)];
        let changes = reconcile(&board_id(), &[], &existing).expect("reconcile");

        assert_eq!(changes.to_delete, vec![ItemId("item-SB-TIER".to_owned())]);
    }

    #[test]
    fn user_owned_items_are_never_touched() {
        let existing = vec![item("NHP-MS250", 1, Decimal::new(74_000, 2), false)];
        let changes = reconcile(&board_id(), &[], &existing).expect("reconcile");

        assert!(changes.is_empty());
    }

    #[test]
    fn proposal_colliding_with_user_owned_identity_fails_loudly() {
        let existing = vec![item("NHP-MS250", 1, Decimal::new(74_000, 2), false)];
        let error =
            reconcile(&board_id(), &[proposal("NHP-MS250", 1, Decimal::new(74_000, 2))], &existing)
                .expect_err("collision with user-owned item");

        assert!(matches!(error, DomainError::IdentityConflict { .. }));
    }

    #[test]
    fn description_named_system_items_stay_system_owned() {
        // A basics entry with a blank part number is named by its catalog
        // description, which no part-family rule can claim; only the
        // ownership flag keeps repeat passes from seeing it as user data.
        let label = proposal("Engraved label kit", 1, Decimal::new(1_250, 2));
        let first = reconcile(&board_id(), &[label.clone()], &[]).expect("first pass");
        assert_eq!(first.to_create.len(), 1);

        let applied = vec![item("Engraved label kit", 1, Decimal::new(1_250, 2), true)];
        let second = reconcile(&board_id(), &[label], &applied).expect("second pass");
        assert!(second.is_empty());
    }

    #[test]
    fn reconcile_is_idempotent() {
        let proposals = vec![
            proposal("SB-TIER", 2, Decimal::new(105_000, 2)),
            proposal("SPD-KIT", 1, Decimal::new(48_500, 2)),
        ];
        let first = reconcile(&board_id(), &proposals, &[]).expect("first reconcile");

        // Apply the first pass's creates, then reconcile again.
        let applied: Vec<Item> = first
            .to_create
            .iter()
            .enumerate()
            .map(|(index, created)| {
                Item::from_proposal(
                    ItemId(format!("item-{index}")),
                    board_id(),
                    created.clone(),
                    true,
                    index as u32,
                )
            })
            .collect();

        let second = reconcile(&board_id(), &proposals, &applied).expect("second reconcile");
        assert!(second.is_empty());
    }
}
