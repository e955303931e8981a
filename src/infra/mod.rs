pub mod csv;
pub mod csv_store;
