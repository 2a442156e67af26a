use super::aggregate::{MarginBand, Unit};
use super::sku::{SkuId, SkuSelection};
use crate::domain::common::{DraftField, ValidationError};
use serde::{Deserialize, Serialize};

/// Contents of the add dialog before validation. Numbers are kept as typed
/// by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDraft {
    pub selection: SkuSelection,
    pub current_stock_qty: f64,
    pub unit: Unit,
    pub lead_time_days: f64,
    pub avg_cost: f64,
    pub base_price: f64,
    pub margin_band: MarginBand,
}

impl Default for InventoryDraft {
    fn default() -> Self {
        Self {
            selection: SkuSelection::default(),
            current_stock_qty: 0.0,
            unit: Unit::Meters,
            lead_time_days: 0.0,
            avg_cost: 0.0,
            base_price: 0.0,
            margin_band: MarginBand::Mid,
        }
    }
}

impl InventoryDraft {
    pub fn sku_preview(&self) -> SkuId {
        self.selection.build()
    }

    /// Checks the numeric fields in dialog order and returns the first error.
    pub fn validate(&self) -> Result<InventoryUpsert, ValidationError> {
        let fields = [
            (DraftField::Stock, self.current_stock_qty),
            (DraftField::LeadTime, self.lead_time_days),
            (DraftField::AvgCost, self.avg_cost),
            (DraftField::BasePrice, self.base_price),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite(field));
            }
            if value < 0.0 {
                return Err(ValidationError::Negative(field));
            }
        }
        if self.lead_time_days.fract() != 0.0 {
            return Err(ValidationError::NotWholeNumber(DraftField::LeadTime));
        }

        Ok(InventoryUpsert {
            sku_id: self.sku_preview(),
            current_stock_qty: self.current_stock_qty,
            unit: self.unit.clone(),
            lead_time_days: self.lead_time_days.min(u32::MAX as f64) as u32,
            avg_cost: self.avg_cost,
            base_price: self.base_price,
            margin_band: self.margin_band,
        })
    }
}

/// The record sent to the store. Timestamps are left to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryUpsert {
    pub sku_id: SkuId,
    pub current_stock_qty: f64,
    pub unit: Unit,
    pub lead_time_days: u32,
    pub avg_cost: f64,
    pub base_price: f64,
    pub margin_band: MarginBand,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_draft_becomes_upsert() {
        let draft = InventoryDraft {
            current_stock_qty: 1200.0,
            lead_time_days: 10.0,
            avg_cost: 300.0,
            base_price: 410.5,
            ..InventoryDraft::default()
        };
        let upsert = draft.validate().unwrap();

        assert_eq!(
            serde_json::to_value(&upsert).unwrap(),
            json!({
                "sku_id": "CU_XLPE_3C_240_AR",
                "current_stock_qty": 1200.0,
                "unit": "m",
                "lead_time_days": 10,
                "avg_cost": 300.0,
                "base_price": 410.5,
                "margin_band": "mid"
            })
        );
    }

    #[test]
    fn test_each_negative_field_is_reported() {
        let cases = [
            (
                InventoryDraft { current_stock_qty: -1.0, ..InventoryDraft::default() },
                "Stock cannot be negative",
            ),
            (
                InventoryDraft { lead_time_days: -2.0, ..InventoryDraft::default() },
                "Lead time cannot be negative",
            ),
            (
                InventoryDraft { avg_cost: -0.5, ..InventoryDraft::default() },
                "Avg cost cannot be negative",
            ),
            (
                InventoryDraft { base_price: -10.0, ..InventoryDraft::default() },
                "Base price cannot be negative",
            ),
        ];
        for (draft, message) in cases {
            assert_eq!(draft.validate().unwrap_err().to_string(), message);
        }
    }

    #[test]
    fn test_first_invalid_field_wins() {
        let draft = InventoryDraft {
            avg_cost: -1.0,
            current_stock_qty: -1.0,
            ..InventoryDraft::default()
        };
        assert_eq!(
            draft.validate(),
            Err(ValidationError::Negative(DraftField::Stock))
        );
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let draft = InventoryDraft {
            base_price: f64::NAN,
            ..InventoryDraft::default()
        };
        assert_eq!(
            draft.validate(),
            Err(ValidationError::NotFinite(DraftField::BasePrice))
        );
    }

    #[test]
    fn test_fractional_lead_time_is_rejected() {
        let draft = InventoryDraft {
            lead_time_days: 2.7,
            ..InventoryDraft::default()
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err, ValidationError::NotWholeNumber(DraftField::LeadTime));
        assert_eq!(err.to_string(), "Lead time must be a whole number");

        let whole = InventoryDraft {
            lead_time_days: 14.0,
            ..InventoryDraft::default()
        };
        assert_eq!(whole.validate().unwrap().lead_time_days, 14);
    }
}
