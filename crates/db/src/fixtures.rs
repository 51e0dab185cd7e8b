use sqlx::Executor;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

const SEED_QUOTE_ID: &str = "quote-seed-001";
const SEED_QUOTE_NUMBER: &str = "Q-1001";
const SEED_BOARD_ID: &str = "board-seed-001";

const SEED_AUTO_ADD_PARTS: &[&str] = &["SB-LABEL", "SB-SCHED", "SB-TEST"];

const SEED_CATALOG_COUNT: i64 = 12;

/// Deterministic seed dataset: the settings singleton, a working catalog
/// slice, and one draft quote with a configured main switchboard carrying a
/// single user-owned line.
pub struct SeedDataset;

#[derive(Clone, Debug)]
pub struct SeedResult {
    pub quote_id: &'static str,
    pub quote_number: &'static str,
    pub board_id: &'static str,
}

#[derive(Clone, Debug)]
pub struct SeedVerification {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}

impl SeedDataset {
    pub const SQL: &str = include_str!("../../../config/fixtures/seed_data.sql");

    /// Loads the seed dataset in one transaction. Fails on a non-empty
    /// database; the seed is a starting state, not an upgrade.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;
        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        Ok(SeedResult {
            quote_id: SEED_QUOTE_ID,
            quote_number: SEED_QUOTE_NUMBER,
            board_id: SEED_BOARD_ID,
        })
    }

    /// Verifies that seed data exists and matches the contract above.
    pub async fn verify(pool: &DbPool) -> Result<SeedVerification, RepositoryError> {
        let mut checks = Vec::new();

        let settings_exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM settings WHERE id = 1)")
                .fetch_one(pool)
                .await?;
        checks.push(("settings-singleton", settings_exists == 1));

        let catalog_count: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM catalog_entry")
            .fetch_one(pool)
            .await?;
        checks.push(("catalog-entries", catalog_count == SEED_CATALOG_COUNT));

        let auto_add_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(1) FROM catalog_entry WHERE is_auto_add = 1 AND category = 'Basics'",
        )
        .fetch_one(pool)
        .await?;
        checks.push(("auto-add-basics", auto_add_count == SEED_AUTO_ADD_PARTS.len() as i64));

        let quote_exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM quote WHERE id = ?1 AND quote_number = ?2 AND status = 'draft')",
        )
        .bind(SEED_QUOTE_ID)
        .bind(SEED_QUOTE_NUMBER)
        .fetch_one(pool)
        .await?;
        checks.push(("seed-quote", quote_exists == 1));

        let board_exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM board WHERE id = ?1 AND quote_id = ?2 AND name = 'MSB01')",
        )
        .bind(SEED_BOARD_ID)
        .bind(SEED_QUOTE_ID)
        .fetch_one(pool)
        .await?;
        checks.push(("seed-board", board_exists == 1));

        let item_count: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM item WHERE board_id = ?1")
            .bind(SEED_BOARD_ID)
            .fetch_one(pool)
            .await?;
        checks.push(("seed-items", item_count == 1));

        let all_present = checks.iter().all(|(_, present)| *present);
        Ok(SeedVerification { all_present, checks })
    }
}
