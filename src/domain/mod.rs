pub mod catalog;
pub mod color;
pub mod order;
pub mod session;
pub mod types;
