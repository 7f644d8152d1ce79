//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! the `From` impls connecting them live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod service {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::questions::QuestionSearchFormError;
    use crate::forms::seed::SeedDocumentError;
    use crate::repository::errors::RepositoryError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::Validation(vec![val.to_string()])
        }
    }

    impl From<RepositoryError> for ServiceError {
        fn from(val: RepositoryError) -> Self {
            match val {
                RepositoryError::Unavailable(_) => ServiceError::StoreUnavailable,
                RepositoryError::Database(_)
                | RepositoryError::ValidationError(_)
                | RepositoryError::Migration(_) => ServiceError::Internal,
            }
        }
    }

    impl From<QuestionSearchFormError> for ServiceError {
        fn from(val: QuestionSearchFormError) -> Self {
            match val {
                QuestionSearchFormError::Validation(rules) => ServiceError::Validation(rules),
                QuestionSearchFormError::TypeConstraint(rule) => {
                    ServiceError::Validation(vec![rule])
                }
            }
        }
    }

    impl From<SeedDocumentError> for ServiceError {
        fn from(val: SeedDocumentError) -> Self {
            ServiceError::Validation(vec![val.to_string()])
        }
    }
}
