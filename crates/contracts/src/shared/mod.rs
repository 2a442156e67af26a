pub mod calendar;
pub mod fetch_sequence;
pub mod list_query;
pub mod load_state;
