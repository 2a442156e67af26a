use super::aggregate::{InventoryItem, MarginBand, Unit};
use crate::shared::list_query::{collate, compare_f64, contains_ci, RowFilter, SortKey};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockFilter {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl StockFilter {
    pub fn code(&self) -> &'static str {
        match self {
            StockFilter::All => "all",
            StockFilter::InStock => "in_stock",
            StockFilter::OutOfStock => "out_of_stock",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockFilter::All => "All Stock",
            StockFilter::InStock => "In Stock",
            StockFilter::OutOfStock => "Out of Stock",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "in_stock" => StockFilter::InStock,
            "out_of_stock" => StockFilter::OutOfStock,
            _ => StockFilter::All,
        }
    }

    pub fn all() -> [StockFilter; 3] {
        [StockFilter::All, StockFilter::InStock, StockFilter::OutOfStock]
    }
}

/// Filter state of the inventory table. `None` means "all".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryFilter {
    pub search: String,
    pub unit: Option<Unit>,
    pub margin: Option<MarginBand>,
    pub stock: StockFilter,
}

impl RowFilter<InventoryItem> for InventoryFilter {
    fn matches(&self, row: &InventoryItem) -> bool {
        let matches_search = contains_ci(&row.sku_id, &self.search);
        let matches_unit = self.unit.as_ref().map_or(true, |unit| &row.unit == unit);
        let matches_margin = self.margin.map_or(true, |band| row.margin_band == band);
        let matches_stock = match self.stock {
            StockFilter::All => true,
            StockFilter::InStock => row.is_in_stock(),
            StockFilter::OutOfStock => row.is_out_of_stock(),
        };

        matches_search && matches_unit && matches_margin && matches_stock
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventorySortKey {
    SkuId,
    CurrentStockQty,
    LeadTimeDays,
    AvgCost,
    BasePrice,
    MarginBand,
    #[default]
    UpdatedAt,
}

impl InventorySortKey {
    pub fn code(&self) -> &'static str {
        match self {
            InventorySortKey::SkuId => "sku_id",
            InventorySortKey::CurrentStockQty => "current_stock_qty",
            InventorySortKey::LeadTimeDays => "lead_time_days",
            InventorySortKey::AvgCost => "avg_cost",
            InventorySortKey::BasePrice => "base_price",
            InventorySortKey::MarginBand => "margin_band",
            InventorySortKey::UpdatedAt => "updated_at",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InventorySortKey::SkuId => "Sort: SKU",
            InventorySortKey::CurrentStockQty => "Sort: Stock Qty",
            InventorySortKey::LeadTimeDays => "Sort: Lead Time",
            InventorySortKey::AvgCost => "Sort: Avg Cost",
            InventorySortKey::BasePrice => "Sort: Base Price",
            InventorySortKey::MarginBand => "Sort: Margin Band",
            InventorySortKey::UpdatedAt => "Sort: Updated",
        }
    }

    pub fn from_code(code: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|key| key.code() == code)
            .unwrap_or_default()
    }

    pub fn all() -> [InventorySortKey; 7] {
        [
            InventorySortKey::UpdatedAt,
            InventorySortKey::SkuId,
            InventorySortKey::CurrentStockQty,
            InventorySortKey::LeadTimeDays,
            InventorySortKey::AvgCost,
            InventorySortKey::BasePrice,
            InventorySortKey::MarginBand,
        ]
    }
}

impl SortKey<InventoryItem> for InventorySortKey {
    fn compare(&self, a: &InventoryItem, b: &InventoryItem) -> Ordering {
        match self {
            InventorySortKey::SkuId => collate(&a.sku_id, &b.sku_id),
            InventorySortKey::CurrentStockQty => {
                compare_f64(a.current_stock_qty, b.current_stock_qty)
            }
            InventorySortKey::LeadTimeDays => a.lead_time_days.cmp(&b.lead_time_days),
            InventorySortKey::AvgCost => compare_f64(a.avg_cost, b.avg_cost),
            InventorySortKey::BasePrice => compare_f64(a.base_price, b.base_price),
            // Band codes sort as text, as shown in the table.
            InventorySortKey::MarginBand => collate(a.margin_band.code(), b.margin_band.code()),
            // Rows without a timestamp sort first.
            InventorySortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

/// Header counts of the inventory panel, over the filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryTotals {
    pub total_skus: usize,
    pub out_of_stock: usize,
}

impl InventoryTotals {
    pub fn over(rows: &[InventoryItem]) -> Self {
        Self {
            total_skus: rows.len(),
            out_of_stock: rows.iter().filter(|item| item.is_out_of_stock()).count(),
        }
    }
}
