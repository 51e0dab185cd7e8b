use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use boardquote_core::domain::board::{Board, BoardConfig, BoardId, BoardType};
use boardquote_core::domain::catalog::{CatalogEntry, CatalogEntryId, MeterType};
use boardquote_core::domain::item::{Item, ItemId};
use boardquote_core::domain::quote::{Quote, QuoteId, QuoteNumber, QuoteStatus};
use boardquote_core::domain::settings::{Settings, SettingsSnapshot};

use super::RepositoryError;

pub(crate) fn decode(column: &str, error: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Decode(format!("column `{column}`: {error}"))
}

pub(crate) fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, RepositoryError> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(raw.trim()).map_err(|error| decode(column, error))
}

pub(crate) fn quantity_column(row: &SqliteRow, column: &str) -> Result<u32, RepositoryError> {
    let raw: i64 = row.try_get(column)?;
    u32::try_from(raw).map_err(|error| decode(column, error))
}

pub(crate) fn item_from_row(row: &SqliteRow) -> Result<Item, RepositoryError> {
    Ok(Item {
        id: ItemId(row.try_get("id")?),
        board_id: BoardId(row.try_get("board_id")?),
        category: row.try_get("category")?,
        subcategory: row.try_get("subcategory")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        quantity: quantity_column(row, "quantity")?,
        unit_price: decimal_column(row, "unit_price")?,
        labour_hours: decimal_column(row, "labour_hours")?,
        cost: decimal_column(row, "cost")?,
        is_default: row.try_get("is_default")?,
        notes: row.try_get("notes")?,
        position: quantity_column(row, "position")?,
    })
}

pub(crate) fn board_from_row(row: &SqliteRow) -> Result<Board, RepositoryError> {
    let board_type_raw: String = row.try_get("board_type")?;
    let config_raw: String = row.try_get("config")?;

    Ok(Board {
        id: BoardId(row.try_get("id")?),
        quote_id: QuoteId(row.try_get("quote_id")?),
        name: row.try_get("name")?,
        board_type: BoardType::from_str(&board_type_raw)
            .map_err(|error| decode("board_type", error))?,
        position: quantity_column(row, "position")?,
        config: serde_json::from_str::<BoardConfig>(&config_raw)
            .map_err(|error| decode("config", error))?,
        is_optional: row.try_get("is_optional")?,
    })
}

pub(crate) fn quote_from_row(row: &SqliteRow) -> Result<Quote, RepositoryError> {
    let status_raw: String = row.try_get("status")?;
    let snapshot_raw: String = row.try_get("settings_snapshot")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Quote {
        id: QuoteId(row.try_get("id")?),
        quote_number: QuoteNumber(row.try_get("quote_number")?),
        client_name: row.try_get("client_name")?,
        client_company: row.try_get("client_company")?,
        project_ref: row.try_get("project_ref")?,
        description: row.try_get("description")?,
        status: QuoteStatus::from_str(&status_raw).map_err(|error| decode("status", error))?,
        settings_snapshot: serde_json::from_str::<SettingsSnapshot>(&snapshot_raw)
            .map_err(|error| decode("settings_snapshot", error))?,
        global_discount_pct: decimal_column(row, "global_discount_pct")?,
        global_contingency: decimal_column(row, "global_contingency")?,
        boards: Vec::new(),
        created_at,
    })
}

pub(crate) fn catalog_entry_from_row(row: &SqliteRow) -> Result<CatalogEntry, RepositoryError> {
    let meter_type_raw: Option<String> = row.try_get("meter_type")?;
    let meter_type = meter_type_raw
        .map(|raw| MeterType::from_str(&raw).map_err(|error| decode("meter_type", error)))
        .transpose()?;

    Ok(CatalogEntry {
        id: CatalogEntryId(row.try_get("id")?),
        part_number: row.try_get("part_number")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        subcategory: row.try_get("subcategory")?,
        brand: row.try_get("brand")?,
        unit_price: decimal_column(row, "unit_price")?,
        labour_hours: decimal_column(row, "labour_hours")?,
        default_quantity: quantity_column(row, "default_quantity")?,
        is_auto_add: row.try_get("is_auto_add")?,
        meter_type,
    })
}

pub(crate) fn settings_from_row(row: &SqliteRow) -> Result<Settings, RepositoryError> {
    Ok(Settings {
        labour_rate: decimal_column(row, "labour_rate")?,
        consumables_pct: decimal_column(row, "consumables_pct")?,
        overhead_pct: decimal_column(row, "overhead_pct")?,
        engineering_pct: decimal_column(row, "engineering_pct")?,
        target_margin_pct: decimal_column(row, "target_margin_pct")?,
        gst_pct: decimal_column(row, "gst_pct")?,
        rounding_increment: decimal_column(row, "rounding_increment")?,
        min_margin_alert_pct: decimal_column(row, "min_margin_alert_pct")?,
        company_name: row.try_get("company_name")?,
        company_contact: row.try_get("company_contact")?,
    })
}
