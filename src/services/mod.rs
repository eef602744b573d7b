//! Business logic behind the HTTP routes.
//!
//! Service functions are generic over the repository traits so they can be
//! exercised with the in-memory test repository. Admin operations take the
//! request's [`AdminSession`](crate::domain::session::AdminSession) and check
//! it before touching any store.

pub mod catalog;
pub mod colors;
pub mod errors;
pub mod orders;
pub mod session;
pub mod upload;

pub use errors::{ServiceError, ServiceResult};
