use contracts::domain::a002_inventory::{InventoryFilter, InventorySortKey, MarginBand, StockFilter, Unit};
use contracts::shared::list_query::{SortDirection, SortSpec};
use leptos::prelude::*;

pub const ALL: &str = "all";

#[derive(Clone, Debug, PartialEq)]
pub struct InventoryState {
    pub search: String,
    pub unit: Option<Unit>,
    pub margin: Option<MarginBand>,
    pub stock: StockFilter,
    pub sort: SortSpec<InventorySortKey>,
    pub page: usize,
}

impl Default for InventoryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            unit: None,
            margin: None,
            stock: StockFilter::All,
            sort: SortSpec::new(InventorySortKey::UpdatedAt, SortDirection::Desc),
            page: 1,
        }
    }
}

impl InventoryState {
    pub fn filter(&self) -> InventoryFilter {
        InventoryFilter {
            search: self.search.clone(),
            unit: self.unit.clone(),
            margin: self.margin,
            stock: self.stock,
        }
    }
}

pub fn unit_from_select(code: &str) -> Option<Unit> {
    (code != ALL).then(|| Unit::from(code.to_string()))
}

pub fn margin_from_select(code: &str) -> Option<MarginBand> {
    (code != ALL).then(|| MarginBand::from_code(code))
}

pub fn create_state() -> RwSignal<InventoryState> {
    RwSignal::new(InventoryState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sort_is_latest_update_first() {
        let state = InventoryState::default();
        assert_eq!(state.sort.key, InventorySortKey::UpdatedAt);
        assert_eq!(state.sort.direction, SortDirection::Desc);
        assert_eq!(state.filter(), InventoryFilter::default());
    }

    #[test]
    fn test_select_codes() {
        assert_eq!(unit_from_select(ALL), None);
        assert_eq!(unit_from_select("nos"), Some(Unit::Pieces));
        assert_eq!(margin_from_select("high"), Some(MarginBand::High));
        assert_eq!(margin_from_select(ALL), None);
    }
}
