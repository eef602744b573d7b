//! JSON shapes returned by the HTTP layer.

pub mod catalog;
pub mod colors;
pub mod orders;
