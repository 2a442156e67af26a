pub mod d001_rfp_console;

pub use d001_rfp_console::ui::RfpConsoleDashboard;
