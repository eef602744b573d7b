pub mod catalog;
pub mod color;
pub mod config;
pub mod order;
