pub mod book;
pub mod catalog;
pub mod id;
pub mod member;
