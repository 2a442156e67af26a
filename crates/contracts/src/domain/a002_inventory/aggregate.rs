use crate::domain::common::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Unit
// ============================================================================

/// Stock unit. `m` and `nos` are offered by the dialog; anything else the
/// store holds is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    #[default]
    Meters,
    Pieces,
    Other(String),
}

impl Unit {
    pub fn code(&self) -> &str {
        match self {
            Unit::Meters => "m",
            Unit::Pieces => "nos",
            Unit::Other(raw) => raw,
        }
    }

    /// Units offered in the add dialog and the unit filter.
    pub fn offered() -> [Unit; 2] {
        [Unit::Meters, Unit::Pieces]
    }
}

impl From<String> for Unit {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "m" => Unit::Meters,
            "nos" => Unit::Pieces,
            _ => Unit::Other(raw),
        }
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Other(raw) => raw,
            known => known.code().to_string(),
        }
    }
}

// ============================================================================
// Margin band
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum MarginBand {
    Low,
    Mid,
    High,
    #[default]
    Unknown,
}

impl MarginBand {
    pub fn code(&self) -> &'static str {
        match self {
            MarginBand::Low => "low",
            MarginBand::Mid => "mid",
            MarginBand::High => "high",
            MarginBand::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarginBand::Low => "Low",
            MarginBand::Mid => "Mid",
            MarginBand::High => "High",
            MarginBand::Unknown => "Unknown",
        }
    }

    /// Case-insensitive; anything unrecognised is `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "low" => MarginBand::Low,
            "mid" => MarginBand::Mid,
            "high" => MarginBand::High,
            _ => MarginBand::Unknown,
        }
    }

    /// Bands a user can pick; `Unknown` only ever comes from the store.
    pub fn selectable() -> [MarginBand; 3] {
        [MarginBand::Low, MarginBand::Mid, MarginBand::High]
    }
}

impl From<Option<String>> for MarginBand {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map(MarginBand::from_code).unwrap_or_default()
    }
}

impl From<MarginBand> for String {
    fn from(band: MarginBand) -> Self {
        band.code().to_string()
    }
}

// ============================================================================
// Record
// ============================================================================

/// One row of the `inventory` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub sku_id: String,
    #[serde(default, deserialize_with = "wire::lenient_f64")]
    pub current_stock_qty: f64,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub unit: Unit,
    #[serde(default, deserialize_with = "wire::lenient_u32")]
    pub lead_time_days: u32,
    #[serde(default, deserialize_with = "wire::lenient_f64")]
    pub avg_cost: f64,
    #[serde(default, deserialize_with = "wire::lenient_f64")]
    pub base_price: f64,
    #[serde(default)]
    pub margin_band: MarginBand,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InventoryItem {
    pub fn is_out_of_stock(&self) -> bool {
        self.current_stock_qty == 0.0
    }

    pub fn is_in_stock(&self) -> bool {
        self.current_stock_qty > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_store_row() {
        let item: InventoryItem = serde_json::from_value(json!({
            "sku_id": "CU_XLPE_3C_240_AR",
            "current_stock_qty": "1500.5",
            "unit": "m",
            "lead_time_days": 14,
            "avg_cost": 410,
            "base_price": "520.00",
            "margin_band": "MID",
            "created_at": "2025-10-01T08:30:00+00:00",
            "updated_at": "2025-10-20T12:00:00.123456+00:00"
        }))
        .unwrap();

        assert_eq!(item.current_stock_qty, 1500.5);
        assert_eq!(item.unit, Unit::Meters);
        assert_eq!(item.lead_time_days, 14);
        assert_eq!(item.base_price, 520.0);
        assert_eq!(item.margin_band, MarginBand::Mid);
        assert!(item.updated_at > item.created_at);
        assert!(item.is_in_stock());
    }

    #[test]
    fn test_unknown_margin_and_custom_unit() {
        let item: InventoryItem = serde_json::from_value(json!({
            "sku_id": "AL_PVC_1C_50_UA",
            "current_stock_qty": 0,
            "unit": "drum",
            "margin_band": null
        }))
        .unwrap();

        assert_eq!(item.unit, Unit::Other("drum".into()));
        assert_eq!(item.unit.code(), "drum");
        assert_eq!(item.margin_band, MarginBand::Unknown);
        assert_eq!(item.created_at, None);
        assert!(item.is_out_of_stock());
    }

    #[test]
    fn test_encode_uses_wire_codes() {
        let value = serde_json::to_value(Unit::Pieces).unwrap();
        assert_eq!(value, json!("nos"));
        let value = serde_json::to_value(MarginBand::High).unwrap();
        assert_eq!(value, json!("high"));
    }
}
