use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use thiserror::Error;
use uuid::Uuid;

use rust_decimal::Decimal;

use boardquote_core::classify::{classify, ClassifierInput};
use boardquote_core::domain::board::{normalize_name, Board, BoardConfig, BoardId, BoardType};
use boardquote_core::domain::catalog::{CatalogEntry, CatalogEntryId};
use boardquote_core::domain::item::{Item, ItemId, ProposedItem};
use boardquote_core::domain::quote::{Quote, QuoteId, QuoteStatus};
use boardquote_core::errors::{ApplicationError, DomainError};
use boardquote_core::merge::{self, MergeOutcome};
use boardquote_core::numbering::next_quote_number;
use boardquote_core::policy::PolicyTable;
use boardquote_core::refresh::refresh_item_prices;
use boardquote_core::reconcile::{reconcile, ChangeSet};
use boardquote_core::synth::{synthesize, PriceBook};
use boardquote_core::totals::{compute_totals, QuoteTotals};

use crate::repositories::rows::{board_from_row, item_from_row, quote_from_row, settings_from_row};
use crate::repositories::{RepositoryError, SqlCatalogRepository};
use crate::DbPool;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("concurrent write lost: {0}")]
    Concurrency(String),
}

impl From<sqlx::Error> for ServiceError {
    fn from(value: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(value))
    }
}

impl From<ServiceError> for ApplicationError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Domain(error) => Self::Domain(error),
            ServiceError::Repository(error) => Self::Persistence(error.to_string()),
            ServiceError::Concurrency(message) => Self::Concurrency(message),
        }
    }
}

/// Raw vendor attributes for one catalog row; the classifier derives the
/// normalized brand/category/meter-type from these on import.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CatalogImportRequest {
    pub part_number: String,
    pub description: String,
    pub vendor_categories: Vec<String>,
    pub manual_brand: Option<String>,
    pub unit_price: Decimal,
    pub labour_hours: Decimal,
    pub default_quantity: u32,
    pub is_auto_add: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreateQuoteRequest {
    pub client_name: String,
    pub client_company: Option<String>,
    pub project_ref: Option<String>,
    pub description: Option<String>,
}

/// Counts from one reconcile pass, for logging and command output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl ReconcileSummary {
    fn from_changes(changes: &ChangeSet) -> Self {
        Self {
            created: changes.to_create.len(),
            updated: changes.to_update.len(),
            deleted: changes.to_delete.len(),
        }
    }
}

/// Transactional entry point for every quote mutation. Pure engines do the
/// deciding; this layer only loads state, runs them, and applies the result
/// atomically.
pub struct QuotingService {
    pool: DbPool,
    policy: PolicyTable,
    price_book: PriceBook,
}

impl QuotingService {
    pub fn new(pool: DbPool, policy: PolicyTable, price_book: PriceBook) -> Self {
        Self { pool, policy, price_book }
    }

    pub fn policy(&self) -> &PolicyTable {
        &self.policy
    }

    /// Classifies raw vendor attributes and saves the resulting catalog
    /// entry. Line items copy catalog values at add time, so re-importing a
    /// part never moves historical quotes.
    pub async fn import_catalog_entry(
        &self,
        request: CatalogImportRequest,
    ) -> Result<CatalogEntry, ServiceError> {
        let classification = classify(&ClassifierInput {
            description: request.description.clone(),
            part_number: request.part_number.clone(),
            vendor_categories: request.vendor_categories,
            manual_brand: request.manual_brand,
        });

        let entry = CatalogEntry {
            id: CatalogEntryId(format!("cat-{}", Uuid::new_v4())),
            part_number: request.part_number,
            description: request.description,
            category: classification.category,
            subcategory: (!classification.subcategory.trim().is_empty())
                .then_some(classification.subcategory),
            brand: Some(classification.brand),
            unit_price: request.unit_price,
            labour_hours: request.labour_hours,
            default_quantity: request.default_quantity,
            is_auto_add: request.is_auto_add,
            meter_type: classification.meter_type,
        };

        SqlCatalogRepository::new(self.pool.clone()).save(entry.clone()).await?;
        tracing::info!(part_number = %entry.part_number, category = %entry.category, "catalog entry imported");
        Ok(entry)
    }

    /// Creates a quote with a freshly allocated number and a snapshot of the
    /// current settings. The number scan and the insert share one transaction;
    /// the unique constraint on `quote_number` backstops concurrent creators.
    pub async fn create_quote(&self, request: CreateQuoteRequest) -> Result<Quote, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let numbers: Vec<String> = sqlx::query_scalar("SELECT quote_number FROM quote")
            .fetch_all(&mut *tx)
            .await?;
        let quote_number = next_quote_number(numbers.iter().map(String::as_str));

        let settings = match sqlx::query("SELECT * FROM settings WHERE id = 1")
            .fetch_optional(&mut *tx)
            .await?
        {
            Some(row) => settings_from_row(&row)?,
            None => Default::default(),
        };

        let quote = Quote {
            id: QuoteId(format!("quote-{}", Uuid::new_v4())),
            quote_number,
            client_name: request.client_name,
            client_company: request.client_company,
            project_ref: request.project_ref,
            description: request.description,
            status: QuoteStatus::initial(),
            settings_snapshot: settings.snapshot(),
            global_discount_pct: Default::default(),
            global_contingency: Default::default(),
            boards: Vec::new(),
            created_at: Utc::now(),
        };

        if let Err(error) = insert_quote(&mut tx, &quote).await {
            if is_unique_violation(&error) {
                return Err(ServiceError::Concurrency(format!(
                    "quote number {} was allocated concurrently",
                    quote.quote_number.0
                )));
            }
            return Err(error);
        }
        tx.commit().await?;

        tracing::info!(quote_id = %quote.id.0, quote_number = %quote.quote_number.0, "quote created");
        Ok(quote)
    }

    /// Appends a board to a quote. The requested name is normalized to the
    /// board type's prefix convention before it is stored.
    pub async fn add_board(
        &self,
        quote_id: &QuoteId,
        name: &str,
        board_type: BoardType,
    ) -> Result<Board, ServiceError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM quote WHERE id = ?1")
            .bind(&quote_id.0)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found("quote", &quote_id.0))?;

        let sibling_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM board WHERE quote_id = ?1")
            .bind(&quote_id.0)
            .fetch_one(&mut *tx)
            .await?;

        let board = Board {
            id: BoardId(format!("board-{}", Uuid::new_v4())),
            quote_id: quote_id.clone(),
            name: normalize_name(board_type, name),
            board_type,
            position: u32::try_from(sibling_count).unwrap_or(u32::MAX),
            config: BoardConfig::default(),
            is_optional: false,
        };
        insert_board(&mut tx, &board).await?;
        tx.commit().await?;

        tracing::info!(board_id = %board.id.0, name = %board.name, "board added");
        Ok(board)
    }

    /// Replaces a board's configuration, re-derives its full system item set,
    /// and applies the resulting change set in one transaction. Safe to rerun;
    /// an unchanged configuration produces an empty change set.
    pub async fn synthesize_and_reconcile(
        &self,
        board_id: &BoardId,
        config: BoardConfig,
    ) -> Result<ReconcileSummary, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let board = fetch_board(&mut tx, board_id).await?;
        let existing = fetch_items(&mut tx, board_id).await?;

        let basics = sqlx::query(
            "SELECT * FROM catalog_entry WHERE is_auto_add = 1 AND category = 'Basics' \
             ORDER BY part_number",
        )
        .fetch_all(&mut *tx)
        .await?
        .iter()
        .map(crate::repositories::rows::catalog_entry_from_row)
        .collect::<Result<Vec<_>, _>>()?;

        let proposed = synthesize(&config, &basics, &self.price_book)?;
        let changes = reconcile(board_id, &proposed, &existing)?;
        let summary = ReconcileSummary::from_changes(&changes);

        let config_json = encode_json("board config", &config)?;
        sqlx::query("UPDATE board SET config = ?1 WHERE id = ?2")
            .bind(&config_json)
            .bind(&board.id.0)
            .execute(&mut *tx)
            .await?;

        apply_changes(&mut tx, board_id, changes, existing.len()).await?;
        tx.commit().await?;

        tracing::info!(
            board_id = %board_id.0,
            created = summary.created,
            updated = summary.updated,
            deleted = summary.deleted,
            "board reconciled"
        );
        Ok(summary)
    }

    /// Manual item add with increment-or-create semantics. Parts the policy
    /// table marks auto-managed are refused here; their quantities belong to
    /// the board configuration.
    pub async fn add_or_merge_item(
        &self,
        board_id: &BoardId,
        proposal: ProposedItem,
    ) -> Result<Item, ServiceError> {
        if self.policy.is_auto_managed(&proposal.name) {
            return Err(ServiceError::Domain(DomainError::InvariantViolation(format!(
                "`{}` is auto-managed; change the board configuration instead",
                proposal.name
            ))));
        }

        let mut tx = self.pool.begin().await?;

        fetch_board(&mut tx, board_id).await?;
        let existing = fetch_items(&mut tx, board_id).await?;

        let item = match merge::resolve(&existing, &proposal) {
            MergeOutcome::Increment { item_id, quantity, cost } => {
                sqlx::query("UPDATE item SET quantity = ?1, cost = ?2 WHERE id = ?3")
                    .bind(i64::from(quantity))
                    .bind(cost.to_string())
                    .bind(&item_id.0)
                    .execute(&mut *tx)
                    .await?;

                let mut merged = existing
                    .into_iter()
                    .find(|item| item.id == item_id)
                    .ok_or_else(|| not_found("item", &item_id.0))?;
                merged.set_quantity(quantity);
                merged
            }
            MergeOutcome::Create(proposal) => {
                let item = Item::from_proposal(
                    ItemId(format!("item-{}", Uuid::new_v4())),
                    board_id.clone(),
                    proposal,
                    false,
                    next_position(&existing),
                );
                insert_item(&mut tx, &item).await?;
                item
            }
        };

        tx.commit().await?;
        tracing::debug!(board_id = %board_id.0, name = %item.name, quantity = item.quantity, "item added");
        Ok(item)
    }

    /// Deletes a user-owned item. Auto-managed items are refused; they would
    /// only come back on the next reconcile.
    pub async fn delete_item(&self, item_id: &ItemId) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT * FROM item WHERE id = ?1")
            .bind(&item_id.0)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found("item", &item_id.0))?;
        let item = item_from_row(&row)?;

        if self.policy.is_auto_managed(&item.name) {
            return Err(ServiceError::Domain(DomainError::InvariantViolation(format!(
                "`{}` is auto-managed; disable it via the board configuration",
                item.name
            ))));
        }

        sqlx::query("DELETE FROM item WHERE id = ?1")
            .bind(&item_id.0)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Totals for one quote across all of its boards, computed from the
    /// quote's frozen settings snapshot.
    pub async fn compute_totals(&self, quote_id: &QuoteId) -> Result<QuoteTotals, ServiceError> {
        let tree = self.fetch_quote_tree(quote_id).await?;
        let items: Vec<&Item> = tree.boards.iter().flat_map(|board| board.items.iter()).collect();
        Ok(compute_totals(
            items,
            &tree.quote.settings_snapshot,
            tree.quote.global_discount_pct,
            tree.quote.global_contingency,
        ))
    }

    /// Deep-copies a quote with all boards and items. The copy gets a fresh
    /// number, resets to draft, and keeps the original's settings snapshot.
    pub async fn duplicate_quote(&self, quote_id: &QuoteId) -> Result<Quote, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT * FROM quote WHERE id = ?1")
            .bind(&quote_id.0)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found("quote", &quote_id.0))?;
        let original = quote_from_row(&row)?;

        let numbers: Vec<String> = sqlx::query_scalar("SELECT quote_number FROM quote")
            .fetch_all(&mut *tx)
            .await?;

        let mut copy = original.clone();
        copy.id = QuoteId(format!("quote-{}", Uuid::new_v4()));
        copy.quote_number = next_quote_number(numbers.iter().map(String::as_str));
        copy.status = QuoteStatus::initial();
        copy.project_ref = Some(match original.project_ref {
            Some(reference) => format!("{reference} (Copy)"),
            None => "(Copy)".to_owned(),
        });
        copy.created_at = Utc::now();

        if let Err(error) = insert_quote(&mut tx, &copy).await {
            if is_unique_violation(&error) {
                return Err(ServiceError::Concurrency(format!(
                    "quote number {} was allocated concurrently",
                    copy.quote_number.0
                )));
            }
            return Err(error);
        }

        let boards = fetch_boards(&mut tx, quote_id).await?;
        for board in &boards {
            let mut board_copy = board.clone();
            board_copy.id = BoardId(format!("board-{}", Uuid::new_v4()));
            board_copy.quote_id = copy.id.clone();
            insert_board(&mut tx, &board_copy).await?;

            for item in fetch_items(&mut tx, &board.id).await? {
                let mut item_copy = item;
                item_copy.id = ItemId(format!("item-{}", Uuid::new_v4()));
                item_copy.board_id = board_copy.id.clone();
                insert_item(&mut tx, &item_copy).await?;
            }
        }

        tx.commit().await?;
        tracing::info!(
            source = %quote_id.0,
            copy = %copy.id.0,
            quote_number = %copy.quote_number.0,
            "quote duplicated"
        );
        Ok(copy)
    }

    /// Moves a quote through its status lifecycle, rejecting transitions the
    /// lifecycle does not allow.
    pub async fn set_quote_status(
        &self,
        quote_id: &QuoteId,
        next: QuoteStatus,
    ) -> Result<Quote, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT * FROM quote WHERE id = ?1")
            .bind(&quote_id.0)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found("quote", &quote_id.0))?;
        let mut quote = quote_from_row(&row)?;
        quote.transition_to(next)?;

        sqlx::query("UPDATE quote SET status = ?1 WHERE id = ?2")
            .bind(quote.status.as_str())
            .bind(&quote.id.0)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(quote)
    }

    /// Re-prices a quote's items from current catalog prices, matching on
    /// part number. Formula-priced parts are left alone; their prices come
    /// from the synthesizer, not the catalog.
    pub async fn refresh_quote_prices(&self, quote_id: &QuoteId) -> Result<usize, ServiceError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM quote WHERE id = ?1")
            .bind(&quote_id.0)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found("quote", &quote_id.0))?;

        let catalog = sqlx::query("SELECT * FROM catalog_entry")
            .fetch_all(&mut *tx)
            .await?
            .iter()
            .map(crate::repositories::rows::catalog_entry_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let mut refreshed = 0;
        for board in fetch_boards(&mut tx, quote_id).await? {
            let items = fetch_items(&mut tx, &board.id).await?;
            for updated in refresh_item_prices(&items, &catalog, &self.policy) {
                sqlx::query(
                    "UPDATE item SET unit_price = ?1, labour_hours = ?2, cost = ?3 WHERE id = ?4",
                )
                .bind(updated.unit_price.to_string())
                .bind(updated.labour_hours.to_string())
                .bind(updated.cost.to_string())
                .bind(&updated.id.0)
                .execute(&mut *tx)
                .await?;
                refreshed += 1;
            }
        }

        tx.commit().await?;
        tracing::info!(quote_id = %quote_id.0, refreshed, "catalog prices refreshed");
        Ok(refreshed)
    }

    /// Quote with boards loaded; used by totals and by read-side commands.
    pub async fn fetch_quote_tree(&self, quote_id: &QuoteId) -> Result<QuoteTree, ServiceError> {
        let row = sqlx::query("SELECT * FROM quote WHERE id = ?1")
            .bind(&quote_id.0)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found("quote", &quote_id.0))?;
        let quote = quote_from_row(&row)?;

        let board_rows =
            sqlx::query("SELECT * FROM board WHERE quote_id = ?1 ORDER BY position")
                .bind(&quote_id.0)
                .fetch_all(&self.pool)
                .await?;

        let mut boards = Vec::with_capacity(board_rows.len());
        for board_row in &board_rows {
            let board = board_from_row(board_row)?;
            let items = sqlx::query("SELECT * FROM item WHERE board_id = ?1 ORDER BY position")
                .bind(&board.id.0)
                .fetch_all(&self.pool)
                .await?
                .iter()
                .map(item_from_row)
                .collect::<Result<Vec<_>, _>>()?;
            boards.push(BoardTree { board, items });
        }

        Ok(QuoteTree { quote, boards })
    }
}

/// A quote with boards and their items fully loaded.
pub struct QuoteTree {
    pub quote: Quote,
    pub boards: Vec<BoardTree>,
}

pub struct BoardTree {
    pub board: Board,
    pub items: Vec<Item>,
}

fn not_found(entity: &'static str, id: &str) -> ServiceError {
    ServiceError::Domain(DomainError::NotFound { entity, id: id.to_owned() })
}

fn is_unique_violation(error: &ServiceError) -> bool {
    match error {
        ServiceError::Repository(RepositoryError::Database(sqlx::Error::Database(db))) => {
            db.is_unique_violation()
        }
        _ => false,
    }
}

fn encode_json<T: serde::Serialize>(what: &str, value: &T) -> Result<String, ServiceError> {
    serde_json::to_string(value)
        .map_err(|error| ServiceError::Repository(RepositoryError::Decode(format!("{what}: {error}"))))
}

fn next_position(existing: &[Item]) -> u32 {
    existing.iter().map(|item| item.position + 1).max().unwrap_or(0)
}

async fn fetch_board(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    board_id: &BoardId,
) -> Result<Board, ServiceError> {
    let row: Option<SqliteRow> = sqlx::query("SELECT * FROM board WHERE id = ?1")
        .bind(&board_id.0)
        .fetch_optional(&mut **tx)
        .await?;
    match row {
        Some(row) => Ok(board_from_row(&row)?),
        None => Err(not_found("board", &board_id.0)),
    }
}

async fn fetch_boards(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    quote_id: &QuoteId,
) -> Result<Vec<Board>, ServiceError> {
    let rows = sqlx::query("SELECT * FROM board WHERE quote_id = ?1 ORDER BY position")
        .bind(&quote_id.0)
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows.iter().map(board_from_row).collect::<Result<Vec<_>, _>>()?)
}

async fn fetch_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    board_id: &BoardId,
) -> Result<Vec<Item>, ServiceError> {
    let rows = sqlx::query("SELECT * FROM item WHERE board_id = ?1 ORDER BY position")
        .bind(&board_id.0)
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows.iter().map(item_from_row).collect::<Result<Vec<_>, _>>()?)
}

async fn apply_changes(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    board_id: &BoardId,
    changes: ChangeSet,
    existing_count: usize,
) -> Result<(), ServiceError> {
    for item_id in &changes.to_delete {
        sqlx::query("DELETE FROM item WHERE id = ?1")
            .bind(&item_id.0)
            .execute(&mut **tx)
            .await?;
    }

    for item in &changes.to_update {
        sqlx::query(
            "UPDATE item SET quantity = ?1, unit_price = ?2, labour_hours = ?3, cost = ?4 \
             WHERE id = ?5",
        )
        .bind(i64::from(item.quantity))
        .bind(item.unit_price.to_string())
        .bind(item.labour_hours.to_string())
        .bind(item.cost.to_string())
        .bind(&item.id.0)
        .execute(&mut **tx)
        .await?;
    }

    let mut position = u32::try_from(existing_count).unwrap_or(u32::MAX);
    for proposal in changes.to_create {
        let item = Item::from_proposal(
            ItemId(format!("item-{}", Uuid::new_v4())),
            board_id.clone(),
            proposal,
            true,
            position,
        );
        insert_item(tx, &item).await?;
        position = position.saturating_add(1);
    }

    Ok(())
}

async fn insert_quote(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    quote: &Quote,
) -> Result<(), ServiceError> {
    let snapshot_json = encode_json("settings snapshot", &quote.settings_snapshot)?;
    sqlx::query(
        "INSERT INTO quote (id, quote_number, client_name, client_company, project_ref, \
         description, status, settings_snapshot, global_discount_pct, global_contingency, \
         created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )
    .bind(&quote.id.0)
    .bind(&quote.quote_number.0)
    .bind(&quote.client_name)
    .bind(&quote.client_company)
    .bind(&quote.project_ref)
    .bind(&quote.description)
    .bind(quote.status.as_str())
    .bind(&snapshot_json)
    .bind(quote.global_discount_pct.to_string())
    .bind(quote.global_contingency.to_string())
    .bind(quote.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_board(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    board: &Board,
) -> Result<(), ServiceError> {
    let config_json = encode_json("board config", &board.config)?;
    sqlx::query(
        "INSERT INTO board (id, quote_id, name, board_type, position, config, is_optional) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(&board.id.0)
    .bind(&board.quote_id.0)
    .bind(&board.name)
    .bind(board.board_type.as_str())
    .bind(i64::from(board.position))
    .bind(&config_json)
    .bind(board.is_optional)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_item(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    item: &Item,
) -> Result<(), ServiceError> {
    sqlx::query(
        "INSERT INTO item (id, board_id, category, subcategory, name, description, quantity, \
         unit_price, labour_hours, cost, is_default, notes, position) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    )
    .bind(&item.id.0)
    .bind(&item.board_id.0)
    .bind(&item.category)
    .bind(&item.subcategory)
    .bind(&item.name)
    .bind(&item.description)
    .bind(i64::from(item.quantity))
    .bind(item.unit_price.to_string())
    .bind(item.labour_hours.to_string())
    .bind(item.cost.to_string())
    .bind(item.is_default)
    .bind(&item.notes)
    .bind(i64::from(item.position))
    .execute(&mut **tx)
    .await?;
    Ok(())
}
