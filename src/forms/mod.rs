pub mod catalog;
pub mod colors;
pub mod orders;
pub mod session;
pub mod upload;
