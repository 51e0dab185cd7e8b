use crate::domain::catalog::CatalogEntry;
use crate::domain::item::Item;
use crate::policy::PolicyTable;

/// Bulk catalog-price refresh: re-prices items whose name matches a catalog
/// part number. Formula-priced items are excluded — their price is computed
/// by the synthesizer, and overwriting it with the flat catalog value would
/// be wrong, not merely stale.
///
/// Returns only the items that actually changed.
pub fn refresh_item_prices(
    items: &[Item],
    catalog: &[CatalogEntry],
    policy: &PolicyTable,
) -> Vec<Item> {
    let mut updated = Vec::new();

    for item in items {
        if policy.is_formula_priced(&item.name) {
            continue;
        }

        let Some(entry) = catalog
            .iter()
            .find(|entry| !entry.part_number.trim().is_empty() && entry.part_number == item.name)
        else {
            continue;
        };

        if item.unit_price == entry.unit_price && item.labour_hours == entry.labour_hours {
            continue;
        }

        let mut repriced = item.clone();
        repriced.reprice(entry.unit_price, entry.labour_hours);
        updated.push(repriced);
    }

    updated
}
