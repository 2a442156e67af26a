//! Typed reads and writes used by the dashboard widgets.

use super::query::RowQuery;
use super::{Collection, RowStore, StoreError};
use crate::domain::a001_rfp::{Rfp, Stage};
use crate::domain::a002_inventory::{InventoryDraft, InventoryItem, InventoryUpsert};
use crate::domain::common::ValidationError;
use crate::shared::calendar::{month_bounds, project_events, DayEvent};
use crate::shared::list_query::SortDirection;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub const RFP_CALENDAR_COLUMNS: [&str; 4] = ["id", "client", "due_date", "stage"];

pub const INVENTORY_COLUMNS: [&str; 9] = [
    "sku_id",
    "current_stock_qty",
    "unit",
    "lead_time_days",
    "avg_cost",
    "base_price",
    "margin_band",
    "created_at",
    "updated_at",
];

pub const INVENTORY_KEY: &str = "sku_id";

/// Decodes rows, skipping the ones that do not match the record shape.
fn decode_rows<T: DeserializeOwned>(collection: Collection, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<T>(row) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("skipping malformed {} row: {}", collection.name(), e);
                None
            }
        })
        .collect()
}

/// RFPs due in `year`/`month`, projected onto days of that month.
pub async fn fetch_month_events(
    store: &dyn RowStore,
    year: i32,
    month: u32,
) -> Result<Vec<DayEvent>, StoreError> {
    let (start, end) = month_bounds(year, month)?;
    let query = RowQuery::new(Collection::Rfps)
        .select(&RFP_CALENDAR_COLUMNS)
        .gte("due_date", start.to_string())
        .lt("due_date", end.to_string())
        .order("due_date", SortDirection::Asc);

    let rows = store.read_rows(&query).await?;
    let rfps: Vec<Rfp> = decode_rows(Collection::Rfps, rows);
    log::debug!("calendar {year}-{month:02}: {} rfps", rfps.len());
    Ok(project_events(&rfps, year, month))
}

/// RFPs for the deadlines table, soonest first. Search and stage are
/// evaluated by the store.
pub async fn fetch_deadlines(
    store: &dyn RowStore,
    search: &str,
    stage: Option<Stage>,
) -> Result<Vec<Rfp>, StoreError> {
    let mut query = RowQuery::new(Collection::Rfps)
        .search(&["id", "client"], search)
        .order("due_date", SortDirection::Asc);
    if let Some(stage) = stage {
        query = query.eq("stage", stage.code());
    }

    let rows = store.read_rows(&query).await?;
    Ok(decode_rows(Collection::Rfps, rows))
}

/// Next RFPs coming due, from `today` on.
pub async fn fetch_recent_rfps(
    store: &dyn RowStore,
    today: NaiveDate,
    limit: usize,
) -> Result<Vec<Rfp>, StoreError> {
    let query = RowQuery::new(Collection::Rfps)
        .gte("due_date", today.to_string())
        .order("due_date", SortDirection::Asc)
        .limit(limit);

    let rows = store.read_rows(&query).await?;
    Ok(decode_rows(Collection::Rfps, rows))
}

/// Every RFP, for the pipeline stats.
pub async fn fetch_all_rfps(store: &dyn RowStore) -> Result<Vec<Rfp>, StoreError> {
    fetch_deadlines(store, "", None).await
}

pub async fn fetch_inventory(store: &dyn RowStore) -> Result<Vec<InventoryItem>, StoreError> {
    let query = RowQuery::new(Collection::Inventory).select(&INVENTORY_COLUMNS);
    let rows = store.read_rows(&query).await?;
    Ok(decode_rows(Collection::Inventory, rows))
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validates the draft and upserts it on `sku_id`. Nothing is written when
/// validation fails.
pub async fn save_inventory_item(
    store: &dyn RowStore,
    draft: &InventoryDraft,
) -> Result<InventoryUpsert, SaveError> {
    let upsert = draft.validate().map_err(|e| {
        log::warn!("inventory draft rejected: {e}");
        e
    })?;

    let record = serde_json::to_value(&upsert).map_err(StoreError::from)?;
    store
        .upsert_row(Collection::Inventory, INVENTORY_KEY, record)
        .await?;
    log::debug!("upserted inventory item {}", upsert.sku_id);
    Ok(upsert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_inventory::MarginBand;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn rfp_rows() -> Vec<Value> {
        vec![
            json!({"id": "RFP-1", "client": "NTPC", "due_date": "2025-11-07", "stage": "qualified",
                   "confidence": 91, "assigned_agent": "Main Agent", "stock_requirement": null}),
            json!({"id": "RFP-2", "client": "Metro", "due_date": "2025-11-07", "stage": "submitted",
                   "confidence": 70, "assigned_agent": "Sales Agent"}),
            json!({"id": "RFP-3", "client": "Grid", "due_date": "2025-12-02", "stage": "priced",
                   "confidence": 80, "assigned_agent": "Pricing Agent"}),
            json!({"id": "RFP-4", "client": "Broken", "due_date": "not a date", "stage": "priced"}),
        ]
    }

    #[tokio::test]
    async fn test_month_events_use_half_open_range() {
        let store = MemoryStore::with_rows(Collection::Rfps, rfp_rows());
        let events = fetch_month_events(&store, 2025, 11).await.unwrap();

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.day == 7));

        let query = &store.reads()[0];
        let pairs = query.to_query_pairs();
        assert!(pairs.contains(&("due_date".into(), "gte.2025-11-01".into())));
        assert!(pairs.contains(&("due_date".into(), "lt.2025-12-01".into())));
    }

    #[tokio::test]
    async fn test_invalid_month_never_reaches_store() {
        let store = MemoryStore::new();
        let err = fetch_month_events(&store, 2025, 13).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidQuery(_)));
        assert!(store.reads().is_empty());
    }

    #[tokio::test]
    async fn test_deadlines_push_down_stage_and_skip_malformed_rows() {
        let store = MemoryStore::with_rows(Collection::Rfps, rfp_rows());

        let all = fetch_deadlines(&store, "", None).await.unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["RFP-1", "RFP-2", "RFP-3"]);

        let priced = fetch_deadlines(&store, "", Some(Stage::Priced)).await.unwrap();
        assert_eq!(priced.len(), 1);
        assert_eq!(priced[0].id, "RFP-3");

        let searched = fetch_deadlines(&store, "metro", None).await.unwrap();
        assert_eq!(searched.len(), 1);
    }

    #[tokio::test]
    async fn test_searched_rows_survive_the_table_pipeline() {
        use crate::domain::a001_rfp::{DeadlineFilter, DeadlineSortKey, DeadlineTotals};
        use crate::shared::list_query::{run_pipeline, PageRequest, SortSpec};

        let store = MemoryStore::with_rows(Collection::Rfps, rfp_rows());
        let today = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        let rows = fetch_deadlines(&store, "NTPC(", None).await.unwrap();
        assert_eq!(rows.len(), 1);

        let mut filter = DeadlineFilter::new(today);
        filter.search = "NTPC(".into();
        let out = run_pipeline(
            &rows,
            &filter,
            &SortSpec::new(DeadlineSortKey::DueDate, SortDirection::Asc),
            PageRequest::first(10),
        );
        assert_eq!(out.page.rows.len(), 1);
        assert_eq!(DeadlineTotals::over(&out.matched, today, 7).total, 1);
    }

    #[tokio::test]
    async fn test_recent_rfps_start_today() {
        let store = MemoryStore::with_rows(Collection::Rfps, rfp_rows());
        let today = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
        let recent = fetch_recent_rfps(&store, today, 5).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, "RFP-3");
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let store = MemoryStore::with_rows(Collection::Rfps, rfp_rows());
        store.inject_failure(Some("timeout"));
        let err = fetch_deadlines(&store, "", None).await.unwrap_err();
        assert_eq!(err.to_string(), "injected failure: timeout");
    }

    #[tokio::test]
    async fn test_save_then_fetch_inventory() {
        let store = MemoryStore::new();
        let draft = InventoryDraft {
            current_stock_qty: 800.0,
            lead_time_days: 12.0,
            avg_cost: 95.0,
            base_price: 120.0,
            margin_band: MarginBand::High,
            ..InventoryDraft::default()
        };
        let saved = save_inventory_item(&store, &draft).await.unwrap();
        assert_eq!(saved.sku_id.as_str(), "CU_XLPE_3C_240_AR");

        let items = fetch_inventory(&store).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].current_stock_qty, 800.0);
        assert_eq!(items[0].margin_band, MarginBand::High);
        assert!(items[0].updated_at.is_some());
    }

    #[tokio::test]
    async fn test_negative_stock_leaves_stored_record_unchanged() {
        let store = MemoryStore::new();
        let draft = InventoryDraft {
            current_stock_qty: 50.0,
            ..InventoryDraft::default()
        };
        save_inventory_item(&store, &draft).await.unwrap();
        let before = store.rows(Collection::Inventory);

        let bad = InventoryDraft {
            current_stock_qty: -5.0,
            ..draft.clone()
        };
        let err = save_inventory_item(&store, &bad).await.unwrap_err();
        assert_eq!(err.to_string(), "Stock cannot be negative");
        assert_eq!(store.rows(Collection::Inventory), before);
    }

    #[tokio::test]
    async fn test_upsert_failure_is_store_error() {
        let store = MemoryStore::new();
        store.inject_failure(Some("read-only"));
        let err = save_inventory_item(&store, &InventoryDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SaveError::Store(StoreError::Injected(_))));
    }
}
