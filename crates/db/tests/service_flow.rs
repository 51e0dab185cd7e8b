use rust_decimal::Decimal;

use boardquote_core::domain::board::{BoardConfig, BoardId, BoardType, EnclosureType, WcMeterType};
use boardquote_core::domain::item::ProposedItem;
use boardquote_core::domain::quote::{QuoteId, QuoteStatus};
use boardquote_core::policy::PolicyTable;
use boardquote_core::synth::PriceBook;
use boardquote_core::domain::catalog::MeterType;
use boardquote_db::{
    connect, CatalogImportRequest, CreateQuoteRequest, DbPool, QuotingService, SeedDataset,
    ServiceError,
};

const SEED_QUOTE: &str = "quote-seed-001";
const SEED_BOARD: &str = "board-seed-001";

async fn service() -> (DbPool, QuotingService) {
    let pool = connect("sqlite::memory:").await.expect("connect");
    boardquote_db::migrations::run_pending(&pool).await.expect("migrate");
    SeedDataset::load(&pool).await.expect("seed");
    let service =
        QuotingService::new(pool.clone(), PolicyTable::standard(), PriceBook::default());
    (pool, service)
}

fn seed_board_config() -> BoardConfig {
    BoardConfig {
        enclosure_type: Some(EnclosureType::WallMount),
        tier_count: Some(2),
        spd: true,
        delivery: true,
        ..BoardConfig::default()
    }
}

async fn item_row(pool: &DbPool, board_id: &str, name: &str) -> Option<(i64, String)> {
    sqlx::query_as::<_, (i64, String)>(
        "SELECT quantity, unit_price FROM item WHERE board_id = ?1 AND name = ?2",
    )
    .bind(board_id)
    .bind(name)
    .fetch_optional(pool)
    .await
    .expect("query item")
}

#[tokio::test]
async fn reconcile_is_idempotent_against_the_store() {
    let (_pool, service) = service().await;
    let board_id = BoardId(SEED_BOARD.to_owned());

    let first =
        service.synthesize_and_reconcile(&board_id, seed_board_config()).await.expect("first pass");
    // 3 basics, enclosure, tier, SPD, delivery.
    assert_eq!(first.created, 7);
    assert_eq!(first.deleted, 0);

    let second = service
        .synthesize_and_reconcile(&board_id, seed_board_config())
        .await
        .expect("second pass");
    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 0);
    assert_eq!(second.deleted, 0);
}

#[tokio::test]
async fn blank_part_number_basics_reconcile_cleanly_on_repeat() {
    let (pool, service) = service().await;
    let board_id = BoardId(SEED_BOARD.to_owned());

    // Catalog entries may omit the part number; the item is then named by
    // its description and no part-family rule can claim it.
    sqlx::query(
        "INSERT INTO catalog_entry (id, part_number, description, category, subcategory, brand, \
         unit_price, labour_hours, default_quantity, is_auto_add, meter_type) \
         VALUES ('cat-label-kit', '', 'Engraved label kit', 'Basics', NULL, NULL, \
         '12.50', '0.4', 1, 1, NULL)",
    )
    .execute(&pool)
    .await
    .expect("insert basics entry");

    let first =
        service.synthesize_and_reconcile(&board_id, seed_board_config()).await.expect("first pass");
    assert_eq!(first.created, 8);

    let second = service
        .synthesize_and_reconcile(&board_id, seed_board_config())
        .await
        .expect("second pass");
    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 0);
    assert_eq!(second.deleted, 0);

    let (quantity, _) =
        item_row(&pool, SEED_BOARD, "Engraved label kit").await.expect("label line");
    assert_eq!(quantity, 1);
}

#[tokio::test]
async fn tier_count_change_reprices_the_whole_quantity() {
    let (pool, service) = service().await;
    let board_id = BoardId(SEED_BOARD.to_owned());

    service.synthesize_and_reconcile(&board_id, seed_board_config()).await.expect("reconcile");
    let (quantity, unit_price) =
        item_row(&pool, SEED_BOARD, "SB-TIER").await.expect("tier line");
    assert_eq!(quantity, 2);
    assert_eq!(unit_price, "1050.00");

    let mut config = seed_board_config();
    config.tier_count = Some(4);
    let summary = service.synthesize_and_reconcile(&board_id, config).await.expect("re-tier");
    assert_eq!(summary.updated, 1);

    let (quantity, unit_price) =
        item_row(&pool, SEED_BOARD, "SB-TIER").await.expect("tier line");
    assert_eq!(quantity, 4);
    assert_eq!(unit_price, "875.00");

    // Reverting the count restores the original single-tier rate exactly.
    let mut config = seed_board_config();
    config.tier_count = Some(1);
    service.synthesize_and_reconcile(&board_id, config).await.expect("revert");

    let (quantity, unit_price) =
        item_row(&pool, SEED_BOARD, "SB-TIER").await.expect("tier line");
    assert_eq!(quantity, 1);
    assert_eq!(unit_price, "1200.00");
}

#[tokio::test]
async fn wc_bundle_enables_scales_and_disables_as_a_unit() {
    let (pool, service) = service().await;
    let board_id = BoardId(SEED_BOARD.to_owned());

    let mut config = seed_board_config();
    config.whole_current_metering = true;
    config.wc_type = Some(WcMeterType::SinglePhase);
    config.wc_quantity = 2;
    service.synthesize_and_reconcile(&board_id, config.clone()).await.expect("enable");

    let (fuses, _) = item_row(&pool, SEED_BOARD, "WCM-FUSE").await.expect("fuses");
    assert_eq!(fuses, 6);
    assert!(item_row(&pool, SEED_BOARD, "WCM-BRK-1P").await.is_some());

    config.wc_quantity = 3;
    service.synthesize_and_reconcile(&board_id, config.clone()).await.expect("rescale");
    let (fuses, _) = item_row(&pool, SEED_BOARD, "WCM-FUSE").await.expect("fuses");
    assert_eq!(fuses, 9);
    let (panels, _) = item_row(&pool, SEED_BOARD, "WCM-PANEL").await.expect("panel");
    assert_eq!(panels, 3);

    service.synthesize_and_reconcile(&board_id, seed_board_config()).await.expect("disable");
    for part in ["WCM-PANEL", "WCM-FUSE", "WCM-NLINK", "WCM-BRK-1P"] {
        assert!(item_row(&pool, SEED_BOARD, part).await.is_none(), "{part} should be gone");
    }
}

#[tokio::test]
async fn repeated_manual_add_merges_into_one_row() {
    let (pool, service) = service().await;
    let board_id = BoardId(SEED_BOARD.to_owned());

    // Same identity as the seeded user-owned main switch line.
    let proposal = ProposedItem {
        category: "Switchboard".to_owned(),
        subcategory: Some("Protection".to_owned()),
        name: "NHP-MS250".to_owned(),
        description: Some("250A main switch".to_owned()),
        quantity: 1,
        unit_price: Decimal::new(99_900, 2),
        labour_hours: Decimal::new(12, 1),
    };
    let merged = service.add_or_merge_item(&board_id, proposal).await.expect("merge");

    assert_eq!(merged.quantity, 2);
    // The existing price wins over the proposal's.
    assert_eq!(merged.unit_price, Decimal::new(74_000, 2));
    assert_eq!(merged.cost, Decimal::new(148_000, 2));

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(1) FROM item WHERE board_id = ?1 AND name = 'NHP-MS250'")
            .bind(SEED_BOARD)
            .fetch_one(&pool)
            .await
            .expect("count");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn auto_managed_parts_are_refused_on_manual_paths() {
    let (pool, service) = service().await;
    let board_id = BoardId(SEED_BOARD.to_owned());

    let tier = ProposedItem {
        category: "Switchboard".to_owned(),
        subcategory: Some("Tiers".to_owned()),
        name: "SB-TIER".to_owned(),
        description: None,
        quantity: 1,
        unit_price: Decimal::new(120_000, 2),
        labour_hours: Decimal::new(25, 1),
    };
    let error = service.add_or_merge_item(&board_id, tier).await.expect_err("manual tier add");
    assert!(matches!(error, ServiceError::Domain(_)));

    service.synthesize_and_reconcile(&board_id, seed_board_config()).await.expect("reconcile");
    let spd_id: String =
        sqlx::query_scalar("SELECT id FROM item WHERE board_id = ?1 AND name = 'SPD-KIT'")
            .bind(SEED_BOARD)
            .fetch_one(&pool)
            .await
            .expect("spd id");
    let error = service
        .delete_item(&boardquote_core::domain::item::ItemId(spd_id))
        .await
        .expect_err("manual delete of auto-managed item");
    assert!(matches!(error, ServiceError::Domain(_)));

    // User-owned lines delete fine.
    service
        .delete_item(&boardquote_core::domain::item::ItemId("item-seed-001".to_owned()))
        .await
        .expect("delete user item");
}

#[tokio::test]
async fn duplication_copies_the_tree_and_preserves_the_snapshot() {
    let (pool, service) = service().await;
    let board_id = BoardId(SEED_BOARD.to_owned());
    service.synthesize_and_reconcile(&board_id, seed_board_config()).await.expect("reconcile");

    let copy = service.duplicate_quote(&QuoteId(SEED_QUOTE.to_owned())).await.expect("duplicate");

    assert_eq!(copy.quote_number.0, "Q-1002");
    assert_eq!(copy.status, QuoteStatus::Draft);
    assert_eq!(copy.project_ref.as_deref(), Some("WF-2026-014 (Copy)"));

    let original = service.fetch_quote_tree(&QuoteId(SEED_QUOTE.to_owned())).await.expect("original");
    let copied = service.fetch_quote_tree(&copy.id).await.expect("copy");
    assert_eq!(copied.quote.settings_snapshot, original.quote.settings_snapshot);
    assert_eq!(copied.boards.len(), original.boards.len());
    assert_eq!(copied.boards[0].items.len(), original.boards[0].items.len());
    assert_eq!(copied.boards[0].board.config, original.boards[0].board.config);

    // Copies carry fresh identities, not shared rows.
    let shared: i64 = sqlx::query_scalar(
        "SELECT COUNT(1) FROM item WHERE board_id = ?1 AND id IN (SELECT id FROM item WHERE board_id = ?2)",
    )
    .bind(SEED_BOARD)
    .bind(&copied.boards[0].board.id.0)
    .fetch_one(&pool)
    .await
    .expect("overlap");
    assert_eq!(shared, 0);
}

#[tokio::test]
async fn quote_numbers_allocate_monotonically() {
    let (_pool, service) = service().await;

    let request = CreateQuoteRequest {
        client_name: "Avery Stone".to_owned(),
        ..CreateQuoteRequest::default()
    };
    let first = service.create_quote(request.clone()).await.expect("first quote");
    let second = service.create_quote(request).await.expect("second quote");

    assert_eq!(first.quote_number.0, "Q-1002");
    assert_eq!(second.quote_number.0, "Q-1003");
    assert_eq!(first.status, QuoteStatus::Draft);
}

#[tokio::test]
async fn catalog_refresh_reprices_bundle_parts_but_not_formula_lines() {
    let (pool, service) = service().await;
    let board_id = BoardId(SEED_BOARD.to_owned());

    let mut config = seed_board_config();
    config.whole_current_metering = true;
    config.wc_type = Some(WcMeterType::ThreePhase);
    config.wc_quantity = 1;
    service.synthesize_and_reconcile(&board_id, config).await.expect("reconcile");

    sqlx::query("UPDATE catalog_entry SET unit_price = '21.00' WHERE part_number = 'WCM-FUSE'")
        .execute(&pool)
        .await
        .expect("bump catalog price");
    sqlx::query("UPDATE catalog_entry SET unit_price = '9999.00' WHERE part_number = 'SB-LABEL'")
        .execute(&pool)
        .await
        .expect("bump basics price");

    let refreshed = service
        .refresh_quote_prices(&QuoteId(SEED_QUOTE.to_owned()))
        .await
        .expect("refresh");
    assert_eq!(refreshed, 2);

    let (_, fuse_price) = item_row(&pool, SEED_BOARD, "WCM-FUSE").await.expect("fuse");
    assert_eq!(fuse_price, "21.00");
    // Formula-priced tier lines keep their schedule price.
    let (_, tier_price) = item_row(&pool, SEED_BOARD, "SB-TIER").await.expect("tier");
    assert_eq!(tier_price, "1050.00");
}

#[tokio::test]
async fn totals_round_up_to_the_increment_with_gst_on_top() {
    let (_pool, service) = service().await;
    let board_id = BoardId(SEED_BOARD.to_owned());
    service.synthesize_and_reconcile(&board_id, seed_board_config()).await.expect("reconcile");

    let totals = service
        .compute_totals(&QuoteId(SEED_QUOTE.to_owned()))
        .await
        .expect("totals");

    assert!(totals.total_material > Decimal::ZERO);
    assert!(totals.sell_price_rounded >= totals.sell_price);
    assert_eq!(totals.sell_price_rounded % Decimal::new(5_000, 2), Decimal::ZERO);
    assert_eq!(
        totals.sell_price_inc_gst,
        (totals.sell_price_rounded * Decimal::new(110, 2)).round_dp(2)
    );
}

#[tokio::test]
async fn imported_meter_lands_in_the_canonical_bucket() {
    let (pool, service) = service().await;

    let entry = service
        .import_catalog_entry(CatalogImportRequest {
            part_number: "CLIP-EM2100".to_owned(),
            description: "CT connected energy meter 100/5".to_owned(),
            vendor_categories: vec!["Metering".to_owned(), "Revenue Meters".to_owned()],
            manual_brand: None,
            unit_price: Decimal::new(31_200, 2),
            labour_hours: Decimal::new(6, 1),
            default_quantity: 1,
            is_auto_add: false,
        })
        .await
        .expect("import");

    assert_eq!(entry.brand.as_deref(), Some("Clipsal"));
    assert_eq!(entry.category, "Switchboard");
    assert_eq!(entry.subcategory.as_deref(), Some("Power Meters"));
    assert_eq!(entry.meter_type, Some(MeterType::CtConnected));

    let (category, subcategory, meter_type): (String, String, String) = sqlx::query_as(
        "SELECT category, subcategory, meter_type FROM catalog_entry WHERE part_number = 'CLIP-EM2100'",
    )
    .fetch_one(&pool)
    .await
    .expect("persisted row");
    assert_eq!(category, "Switchboard");
    assert_eq!(subcategory, "Power Meters");
    assert_eq!(meter_type, "ct_connected");
}

#[tokio::test]
async fn status_lifecycle_is_enforced() {
    let (_pool, service) = service().await;
    let quote_id = QuoteId(SEED_QUOTE.to_owned());

    let error =
        service.set_quote_status(&quote_id, QuoteStatus::Accepted).await.expect_err("skip sent");
    assert!(matches!(error, ServiceError::Domain(_)));

    let sent = service.set_quote_status(&quote_id, QuoteStatus::Sent).await.expect("send");
    assert_eq!(sent.status, QuoteStatus::Sent);
    let accepted =
        service.set_quote_status(&quote_id, QuoteStatus::Accepted).await.expect("accept");
    assert_eq!(accepted.status, QuoteStatus::Accepted);
}
