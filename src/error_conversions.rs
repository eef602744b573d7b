//! Error conversion glue between the domain, form, repository and service layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the conversions live here instead of next to the error definitions.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::catalog::{CatalogFormError, DeleteCatalogItemFormError};
    use crate::forms::colors::ReplaceColorsFormError;
    use crate::forms::orders::{OrderIdFormError, SubmitOrderFormError};
    use crate::forms::upload::UploadImageFormError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<SubmitOrderFormError> for ServiceError {
        fn from(val: SubmitOrderFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<OrderIdFormError> for ServiceError {
        fn from(val: OrderIdFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<CatalogFormError> for ServiceError {
        fn from(val: CatalogFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<DeleteCatalogItemFormError> for ServiceError {
        fn from(val: DeleteCatalogItemFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<ReplaceColorsFormError> for ServiceError {
        fn from(val: ReplaceColorsFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<UploadImageFormError> for ServiceError {
        fn from(val: UploadImageFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }
}
