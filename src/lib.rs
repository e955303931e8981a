//! Flat-file library catalog: books, members and borrow/return tracking.

pub mod application;
pub mod domain;
pub mod infra;
pub mod interface;
