pub mod a001_rfp;
pub mod a002_inventory;
