pub mod aggregate;
pub mod draft;
pub mod filter;
pub mod sku;

pub use aggregate::{InventoryItem, MarginBand, Unit};
pub use draft::{InventoryDraft, InventoryUpsert};
pub use filter::{InventoryFilter, InventorySortKey, InventoryTotals, StockFilter};
pub use sku::{Conductor, Cores, Csa, Insulation, SkuId, SkuSelection, Special, SKU_SEPARATOR};
