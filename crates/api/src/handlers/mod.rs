pub mod catalog;
pub mod views;
