pub mod dashboard;
pub mod header;
pub mod stats;

pub use dashboard::RfpConsoleDashboard;
