use boardquote_core::domain::catalog::CatalogEntry;

use super::RepositoryError;
use crate::DbPool;

/// Write side of the catalog. Reads that must see a transaction's view run
/// inside the service; this upsert is the single ingestion choke point.
pub struct SqlCatalogRepository {
    pool: DbPool,
}

impl SqlCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn save(&self, entry: CatalogEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO catalog_entry (id, part_number, description, category, subcategory, \
             brand, unit_price, labour_hours, default_quantity, is_auto_add, meter_type) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) \
             ON CONFLICT(id) DO UPDATE SET part_number = excluded.part_number, \
             description = excluded.description, category = excluded.category, \
             subcategory = excluded.subcategory, brand = excluded.brand, \
             unit_price = excluded.unit_price, labour_hours = excluded.labour_hours, \
             default_quantity = excluded.default_quantity, is_auto_add = excluded.is_auto_add, \
             meter_type = excluded.meter_type",
        )
        .bind(&entry.id.0)
        .bind(&entry.part_number)
        .bind(&entry.description)
        .bind(&entry.category)
        .bind(&entry.subcategory)
        .bind(&entry.brand)
        .bind(entry.unit_price.to_string())
        .bind(entry.labour_hours.to_string())
        .bind(i64::from(entry.default_quantity))
        .bind(entry.is_auto_add)
        .bind(entry.meter_type.map(|meter_type| meter_type.as_str()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
