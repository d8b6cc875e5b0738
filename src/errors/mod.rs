//! Fault taxonomy and boundary classification

pub mod business;
pub mod classifier;
pub mod validation;

pub use business::BusinessError;
pub use classifier::{classify, AppError};
pub use validation::{
    BindingError, ConstraintViolationError, FieldError, InvalidArgumentError,
    PayloadValidationError, TypeMismatchError,
};
