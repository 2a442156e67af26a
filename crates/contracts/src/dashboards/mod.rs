pub mod d001_rfp_console;
